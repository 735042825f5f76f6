pub mod pmd;

pub use pmd::{PmdIssueProvider, PmdResultAction};
