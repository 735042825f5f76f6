use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::analysis::AnalysisResult;
use crate::host::{Execution, ExecutionId};
use crate::model::Issue;
use crate::services::locator::{ResultAction, ResultLocator};
use crate::services::mapper::{FileAnnotationMapper, IssueMapper, MappingError};

#[derive(Debug, Error)]
pub enum IssueError {
    #[error("{origin}: failed to map annotations of {execution}")]
    Mapping {
        origin: String,
        execution: ExecutionId,
        #[source]
        source: MappingError,
    },
}

/// Registry metadata for a provider. Declared, never computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Short, stable token identifying the tool; unique across registered providers.
    pub origin: String,
    /// Human-readable tool name.
    pub origin_plugin_name: String,
    /// Project-level result page name used for dashboard deep links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_result_url_name: Option<String>,
    /// Build-level result page name used for dashboard deep links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_result_url_name: Option<String>,
}

impl ProviderInfo {
    pub fn new(origin: impl Into<String>, origin_plugin_name: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            origin_plugin_name: origin_plugin_name.into(),
            project_result_url_name: None,
            build_result_url_name: None,
        }
    }

    pub fn with_result_urls(
        mut self,
        project_result_url_name: Option<&str>,
        build_result_url_name: Option<&str>,
    ) -> Self {
        self.project_result_url_name = project_result_url_name.map(str::to_string);
        self.build_result_url_name = build_result_url_name.map(str::to_string);
        self
    }
}

/// Supplies canonical issues for one analysis tool.
///
/// Implementations are stateless between calls and may serve many executions
/// concurrently.
pub trait IssueProvider: Send + Sync {
    fn info(&self) -> &ProviderInfo;

    /// Issues currently present on `execution`. Empty when the tool did not run.
    fn existing_issues(&self, execution: &dyn Execution) -> Result<Vec<Issue>, IssueError>;

    /// Whether [`IssueProvider::fixed_issues`] can return a list at all.
    fn can_provide_fixed_issues(&self) -> bool;

    /// Issues present on the previous execution but gone from this one.
    ///
    /// `Ok(None)` means "not supported", which callers must keep apart from
    /// `Ok(Some(vec![]))`.
    fn fixed_issues(&self, execution: &dyn Execution) -> Result<Option<Vec<Issue>>, IssueError>;

    fn origin(&self) -> &str {
        &self.info().origin
    }

    fn origin_plugin_name(&self) -> &str {
        &self.info().origin_plugin_name
    }

    fn project_result_url_name(&self) -> Option<&str> {
        self.info().project_result_url_name.as_deref()
    }

    fn build_result_url_name(&self) -> Option<&str> {
        self.info().build_result_url_name.as_deref()
    }
}

/// How a provider answers fixed-issue queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixedIssueSupport {
    /// The tool has no stable baseline across executions.
    #[default]
    Unsupported,
    /// Compare against the previous execution's result by context hash.
    AgainstPrevious,
}

/// Issue provider for any tool whose result action implements [`ResultAction`].
pub struct AnnotationIssueProvider<A> {
    info: ProviderInfo,
    locator: ResultLocator<A>,
    mapper: FileAnnotationMapper,
    fixed: FixedIssueSupport,
}

impl<A: ResultAction> AnnotationIssueProvider<A> {
    pub fn new(info: ProviderInfo) -> Self {
        Self {
            info,
            locator: ResultLocator::new(),
            mapper: FileAnnotationMapper,
            fixed: FixedIssueSupport::Unsupported,
        }
    }

    pub fn with_fixed_issues(mut self, fixed: FixedIssueSupport) -> Self {
        self.fixed = fixed;
        self
    }

    fn map_result(
        &self,
        execution: &dyn Execution,
        result: &AnalysisResult,
    ) -> Result<Vec<Issue>, IssueError> {
        let issues = result
            .annotations()
            .iter()
            .map(|annotation| self.mapper.map(annotation))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| IssueError::Mapping {
                origin: self.info.origin.clone(),
                execution: execution.id().clone(),
                source,
            })?;
        trace!(
            origin = %self.info.origin,
            execution = %execution.id(),
            count = issues.len(),
            "mapped issues"
        );
        Ok(issues)
    }
}

impl<A: ResultAction> IssueProvider for AnnotationIssueProvider<A> {
    fn info(&self) -> &ProviderInfo {
        &self.info
    }

    fn existing_issues(&self, execution: &dyn Execution) -> Result<Vec<Issue>, IssueError> {
        match self.locator.locate(execution) {
            Some(result) => self.map_result(execution, result),
            None => {
                debug!(
                    origin = %self.info.origin,
                    execution = %execution.id(),
                    "no analysis result attached"
                );
                Ok(Vec::new())
            }
        }
    }

    fn can_provide_fixed_issues(&self) -> bool {
        self.fixed != FixedIssueSupport::Unsupported
    }

    fn fixed_issues(&self, execution: &dyn Execution) -> Result<Option<Vec<Issue>>, IssueError> {
        match self.fixed {
            FixedIssueSupport::Unsupported => Ok(None),
            FixedIssueSupport::AgainstPrevious => {
                let Some(previous) = execution.previous() else {
                    debug!(
                        origin = %self.info.origin,
                        execution = %execution.id(),
                        "no previous execution"
                    );
                    return Ok(Some(Vec::new()));
                };
                // No result means the tool did not run, not that everything was fixed.
                let Some(result) = self.locator.locate(execution) else {
                    debug!(
                        origin = %self.info.origin,
                        execution = %execution.id(),
                        "no analysis result attached; nothing counts as fixed"
                    );
                    return Ok(Some(Vec::new()));
                };
                let current = self.map_result(execution, result)?;
                let still_present: HashSet<_> =
                    current.iter().map(|issue| &issue.context_hash).collect();
                let fixed = self
                    .existing_issues(previous)?
                    .into_iter()
                    .filter(|issue| !still_present.contains(&issue.context_hash))
                    .collect();
                Ok(Some(fixed))
            }
        }
    }
}

impl<A> fmt::Debug for AnnotationIssueProvider<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotationIssueProvider")
            .field("info", &self.info)
            .field("locator", &self.locator)
            .field("fixed", &self.fixed)
            .finish()
    }
}
