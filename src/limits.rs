//! Listing page sizes
//!
//! Page sizes for the `*/list` methods. The defaults are what clients of this
//! server have always seen; override them only when a host needs smaller pages.

use serde::{Deserialize, Serialize};

/// Page size for each paginated listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLimits {
    /// Page size for `tools/list`
    pub tools: usize,

    /// Page size for `prompts/list`
    pub prompts: usize,

    /// Page size for `resources/list`
    pub resources: usize,

    /// Page size for `resources/templates/list`
    pub resource_templates: usize,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            tools: 50,
            prompts: 20,
            resources: 20,
            resource_templates: 20,
        }
    }
}

impl PageLimits {
    /// The same page size for every listing (minimum 1)
    pub fn uniform(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            tools: page_size,
            prompts: page_size,
            resources: page_size,
            resource_templates: page_size,
        }
    }
}
