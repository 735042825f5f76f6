use std::any::Any;

use crate::analysis::AnalysisResult;
use crate::host::Action;
use crate::services::locator::ResultAction;
use crate::services::provider::{AnnotationIssueProvider, ProviderInfo};

pub const PMD_ORIGIN: &str = "pmd";
pub const PMD_PLUGIN_NAME: &str = "PMD Plugin";
pub const PMD_PROJECT_RESULT_URL: &str = "pmdResult";
pub const PMD_BUILD_RESULT_URL: &str = "pmd";

/// PMD's result action, attached to an execution after PMD ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PmdResultAction {
    result: AnalysisResult,
}

impl PmdResultAction {
    pub fn new(result: AnalysisResult) -> Self {
        Self { result }
    }
}

impl Action for PmdResultAction {
    fn url_name(&self) -> Option<&str> {
        Some(PMD_BUILD_RESULT_URL)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ResultAction for PmdResultAction {
    fn result(&self) -> &AnalysisResult {
        &self.result
    }
}

/// Issue provider for PMD. Fixed issues are not supported.
pub type PmdIssueProvider = AnnotationIssueProvider<PmdResultAction>;

impl Default for AnnotationIssueProvider<PmdResultAction> {
    fn default() -> Self {
        let info = ProviderInfo::new(PMD_ORIGIN, PMD_PLUGIN_NAME)
            .with_result_urls(Some(PMD_PROJECT_RESULT_URL), Some(PMD_BUILD_RESULT_URL));
        Self::new(info)
    }
}
