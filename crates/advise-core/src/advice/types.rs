use serde::{Deserialize, Serialize};
use url::Url;

/// One `###`-headed block of advice: a title, its statements, and the
/// bibliography collected from the section's references block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceSection {
    pub title: String,
    pub statements: Vec<AdviceStatement>,
    pub references: Vec<Reference>,
}

impl AdviceSection {
    pub(crate) fn new(title: String) -> Self {
        Self {
            title,
            statements: Vec::new(),
            references: Vec::new(),
        }
    }
}

/// One unit of advice prose, with the reference numbers cited inline
/// (e.g. a trailing `**[1,2]**`). `text` is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceStatement {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reference_numbers: Vec<u32>,
}

/// A numbered bibliography entry parsed from a `[N][text](url)` marker.
///
/// Numbers are kept as they appear in the text, in scan order; they are not
/// deduplicated or checked for gaps. The URL is optional in the data model
/// even though marker parsing only ever produces one: entries from other
/// producers may lack it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub number: u32,
    pub link_text: String,
    pub url: Option<Url>,
}
