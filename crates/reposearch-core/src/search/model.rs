//! Search domain models.

use serde::{Deserialize, Serialize};

/// Text shown in place of a missing repository description.
pub const NO_DESCRIPTION_PLACEHOLDER: &str = "No description available";

/// Page numbers are 1-based.
pub const FIRST_PAGE: u32 = 1;

/// Owner of a repository as reported by the search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepositoryOwner {
    /// Owner display name.
    pub login: String,
    /// Avatar image URL.
    pub avatar_url: String,
}

/// A single search hit. Immutable once fetched and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultItem {
    /// Unique within a result set.
    pub id: u64,
    /// Display name.
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub owner: RepositoryOwner,
    /// Canonical external link.
    pub html_url: String,
}

impl ResultItem {
    /// Description, or [`NO_DESCRIPTION_PLACEHOLDER`] when absent or empty.
    pub fn description_or_placeholder(&self) -> &str {
        match self.description.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => NO_DESCRIPTION_PLACEHOLDER,
        }
    }

    /// Link handed to the page viewer when this item is selected.
    pub fn page_link(&self) -> PageLink {
        PageLink {
            url: self.html_url.clone(),
            title: self.name.clone(),
        }
    }
}

/// What the embedded page viewer receives: a URL and a title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageLink {
    pub url: String,
    pub title: String,
}

/// Normalized gateway response for one page.
///
/// Missing fields in the raw response are already defaulted, so downstream
/// code never checks for absence.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResponse {
    pub items: Vec<ResultItem>,
    pub total_count: u64,
}

/// Accumulated results for the live keyword.
///
/// Page 1 replaces the collection, later pages append. `total_count` is the
/// gateway-reported number of matches and is never recomputed from `items`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultPage {
    /// Query that produced these items.
    pub keyword: String,
    pub items: Vec<ResultItem>,
    pub total_count: u64,
    /// Last successfully fetched page; 0 while empty.
    pub page: u32,
}

impl ResultPage {
    /// Creates an empty page collection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the collection from a first-page response.
    pub fn first(keyword: impl Into<String>, response: SearchResponse) -> Self {
        Self {
            keyword: keyword.into(),
            items: response.items,
            total_count: response.total_count,
            page: FIRST_PAGE,
        }
    }

    /// Appends a later page and advances the cursor to `page`.
    pub fn append(&mut self, page: u32, response: SearchResponse) {
        self.items.extend(response.items);
        self.total_count = response.total_count;
        self.page = page;
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn find(&self, id: u64) -> Option<&ResultItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Header label such as `"1,234 repositories found"`.
    pub fn summary_label(&self) -> String {
        format!("{} repositories found", group_thousands(self.total_count))
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, name: &str) -> ResultItem {
        ResultItem {
            id,
            name: name.to_string(),
            description: None,
            owner: RepositoryOwner {
                login: "octocat".to_string(),
                avatar_url: "https://avatars.example/octocat".to_string(),
            },
            html_url: format!("https://github.com/octocat/{name}"),
        }
    }

    #[test]
    fn test_description_placeholder() {
        let mut repo = item(1, "hello");
        assert_eq!(repo.description_or_placeholder(), NO_DESCRIPTION_PLACEHOLDER);

        repo.description = Some(String::new());
        assert_eq!(repo.description_or_placeholder(), NO_DESCRIPTION_PLACEHOLDER);

        repo.description = Some("A greeting".to_string());
        assert_eq!(repo.description_or_placeholder(), "A greeting");
    }

    #[test]
    fn test_append_keeps_reported_total() {
        let mut page = ResultPage::first(
            "foo",
            SearchResponse {
                items: vec![item(1, "a"), item(2, "b")],
                total_count: 2,
            },
        );
        page.append(
            2,
            SearchResponse {
                items: vec![item(3, "c")],
                total_count: 2,
            },
        );

        let names: Vec<&str> = page.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(page.total_count, 2);
        assert_eq!(page.page, 2);
    }

    #[test]
    fn test_summary_label_groups_thousands() {
        let mut page = ResultPage::empty();
        assert_eq!(page.summary_label(), "0 repositories found");
        page.total_count = 1_234_567;
        assert_eq!(page.summary_label(), "1,234,567 repositories found");
        page.total_count = 999;
        assert_eq!(page.summary_label(), "999 repositories found");
    }

    #[test]
    fn test_page_link_uses_name_as_title() {
        let link = item(7, "tokio").page_link();
        assert_eq!(link.title, "tokio");
        assert_eq!(link.url, "https://github.com/octocat/tokio");
    }

    #[test]
    fn test_item_deserializes_without_description() {
        let json = r#"{
            "id": 42,
            "name": "demo",
            "owner": {"login": "me", "avatar_url": "https://a/me", "type": "User"},
            "html_url": "https://github.com/me/demo",
            "stargazers_count": 10
        }"#;
        let parsed: ResultItem = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.id, 42);
        assert!(parsed.description.is_none());
    }
}
