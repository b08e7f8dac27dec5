use serde::{Deserialize, Serialize};

/// A named group of selectable tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCategory {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl TagCategory {
    pub fn new(name: &str, tags: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Built-in tag taxonomy
pub fn default_taxonomy() -> Vec<TagCategory> {
    vec![
        TagCategory::new("技术类", &["AI/ML", "LLM", "RAG", "Web3", "云计算", "网络安全"]),
        TagCategory::new("商业类", &["创业", "投资", "市场动态"]),
        TagCategory::new("科技类", &["硬件", "软件", "创新"]),
        TagCategory::new("行业类", &["金融", "医疗", "教育", "零售"]),
        TagCategory::new("地区类", &["国内", "国际", "地方新闻"]),
    ]
}

/// Set of selected tags, kept in selection order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSelection {
    tags: Vec<String>,
}

impl TagSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the tag if absent, remove it otherwise. Returns whether it is now selected.
    pub fn toggle(&mut self, tag: &str) -> bool {
        if let Some(pos) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(pos);
            false
        } else {
            self.tags.push(tag.to_string());
            true
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selection = Self::new();
        for tag in iter {
            let tag = tag.as_ref();
            if !selection.contains(tag) {
                selection.tags.push(tag.to_string());
            }
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_taxonomy_layout() {
        let taxonomy = default_taxonomy();
        let names: Vec<&str> = taxonomy.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["技术类", "商业类", "科技类", "行业类", "地区类"]);
        assert_eq!(taxonomy[0].tags.len(), 6);
        assert!(taxonomy[0].tags.contains(&"云计算".to_string()));
    }

    #[test]
    fn test_toggle_adds_and_removes() {
        let mut selection = TagSelection::new();
        assert!(selection.toggle("AI/ML"));
        assert!(selection.toggle("云计算"));
        assert_eq!(selection.len(), 2);

        assert!(!selection.toggle("AI/ML"));
        assert_eq!(selection.as_slice(), &["云计算".to_string()]);
    }

    #[test]
    fn test_collect_deduplicates() {
        let selection: TagSelection = ["LLM", "RAG", "LLM"].into_iter().collect();
        assert_eq!(selection.as_slice(), &["LLM".to_string(), "RAG".to_string()]);
    }
}
