use thiserror::Error;

use crate::analysis::FileAnnotation;
use crate::model::{ContextHash, Issue, Priority, PriorityParseError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// The tool emitted a priority the canonical set does not know.
    ///
    /// This means the adapter and the tool disagree on versions; it is never
    /// replaced by a default severity.
    #[error("Annotation {context_hash}: {source}")]
    UnknownPriority {
        context_hash: ContextHash,
        #[source]
        source: PriorityParseError,
    },
}

/// Maps one tool-specific annotation to a canonical issue.
pub trait IssueMapper<T: ?Sized>: Send + Sync {
    fn map(&self, annotation: &T) -> Result<Issue, MappingError>;
}

/// Mapper for any [`FileAnnotation`]: copies hash and message, parses priority by name.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileAnnotationMapper;

impl<T: FileAnnotation + ?Sized> IssueMapper<T> for FileAnnotationMapper {
    fn map(&self, annotation: &T) -> Result<Issue, MappingError> {
        let priority =
            annotation.priority_name().parse::<Priority>().map_err(|source| {
                MappingError::UnknownPriority {
                    context_hash: annotation.context_hash().clone(),
                    source,
                }
            })?;
        Ok(Issue {
            context_hash: annotation.context_hash().clone(),
            message: annotation.message().to_string(),
            priority,
        })
    }
}
