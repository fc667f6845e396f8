//! Box-drawing trees.
//!
//! Roadmaps are drawn from explicit [`TreeNode`]s: phases at the top,
//! items nested under their parents. Other results are drawn from their
//! serialized fields.

use super::OutputConfig;
use colored::Colorize;
use rmap_core::ItemStatus;
use serde::Serialize;

pub struct TreeOutput;

/// Connector pieces, each four columns wide.
struct TreeChars {
    /// Under a sibling that has more siblings below
    pipe: &'static str,
    branch: &'static str,
    last: &'static str,
    /// Under the last sibling
    space: &'static str,
}

const CHARS: TreeChars = TreeChars {
    pipe: "\u{2502}   ",
    branch: "\u{251c}\u{2500}\u{2500} ",
    last: "\u{2514}\u{2500}\u{2500} ",
    space: "    ",
};

impl TreeOutput {
    /// Draw a serializable value as a tree of its fields.
    pub fn format<T: Serialize>(data: &T, config: &OutputConfig) -> String {
        match serde_json::to_value(data) {
            Ok(serde_json::Value::Object(obj)) => Self::format_object(&obj, config, ""),
            Ok(serde_json::Value::Array(arr)) => Self::format_array(&arr, config, ""),
            Ok(other) => Self::format_scalar(&other, config),
            Err(_) => "(error serializing data)".to_string(),
        }
    }

    fn format_scalar(value: &serde_json::Value, config: &OutputConfig) -> String {
        let text = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        if !config.use_colors() {
            return text;
        }
        match value {
            serde_json::Value::String(_) => text.yellow().to_string(),
            serde_json::Value::Number(_) => text.cyan().to_string(),
            serde_json::Value::Bool(true) => text.green().to_string(),
            serde_json::Value::Bool(false) => text.red().to_string(),
            _ => text.dimmed().to_string(),
        }
    }

    fn format_object(
        obj: &serde_json::Map<String, serde_json::Value>,
        config: &OutputConfig,
        prefix: &str,
    ) -> String {
        let use_colors = config.use_colors();
        let mut lines = Vec::new();
        let len = obj.len();

        for (i, (key, value)) in obj.iter().enumerate() {
            let is_last = i == len - 1;
            let connector = if is_last { CHARS.last } else { CHARS.branch };
            let child_prefix = format!("{}{}", prefix, if is_last { CHARS.space } else { CHARS.pipe });

            let key_str = if use_colors {
                key.bold().to_string()
            } else {
                key.clone()
            };

            match value {
                serde_json::Value::Object(nested) if !nested.is_empty() => {
                    lines.push(format!("{}{}{}", prefix, connector, key_str));
                    lines.push(Self::format_object(nested, config, &child_prefix));
                }
                serde_json::Value::Array(arr) if !arr.is_empty() => {
                    lines.push(format!("{}{}{} [{}]", prefix, connector, key_str, arr.len()));
                    lines.push(Self::format_array(arr, config, &child_prefix));
                }
                _ => {
                    let value_str = Self::format_scalar(value, config);
                    lines.push(format!("{}{}{}: {}", prefix, connector, key_str, value_str));
                }
            }
        }

        lines.join("\n")
    }

    fn format_array(arr: &[serde_json::Value], config: &OutputConfig, prefix: &str) -> String {
        let mut lines = Vec::new();
        let len = arr.len();

        for (i, item) in arr.iter().enumerate() {
            let is_last = i == len - 1;
            let connector = if is_last { CHARS.last } else { CHARS.branch };
            let child_prefix = format!("{}{}", prefix, if is_last { CHARS.space } else { CHARS.pipe });

            match item {
                serde_json::Value::Object(obj) if !obj.is_empty() => {
                    lines.push(format!("{}{}[{}]", prefix, connector, i));
                    lines.push(Self::format_object(obj, config, &child_prefix));
                }
                serde_json::Value::Array(nested) if !nested.is_empty() => {
                    lines.push(format!("{}{}[{}] [{}]", prefix, connector, i, nested.len()));
                    lines.push(Self::format_array(nested, config, &child_prefix));
                }
                _ => {
                    let value_str = Self::format_scalar(item, config);
                    lines.push(format!("{}{}{}", prefix, connector, value_str));
                }
            }
        }

        lines.join("\n")
    }

    /// Draw `children` under a `root` label.
    pub fn from_nodes(root: &str, children: &[TreeNode], config: &OutputConfig) -> String {
        let root_str = if config.use_colors() {
            root.bold().to_string()
        } else {
            root.to_string()
        };

        let mut lines = vec![root_str];
        Self::format_nodes(children, config, "", &mut lines);
        lines.join("\n")
    }

    fn format_nodes(
        nodes: &[TreeNode],
        config: &OutputConfig,
        prefix: &str,
        lines: &mut Vec<String>,
    ) {
        let use_colors = config.use_colors();
        let len = nodes.len();

        for (i, node) in nodes.iter().enumerate() {
            let is_last = i == len - 1;
            let connector = if is_last { CHARS.last } else { CHARS.branch };
            let child_prefix = format!("{}{}", prefix, if is_last { CHARS.space } else { CHARS.pipe });

            let name_str = if use_colors {
                match node.kind {
                    NodeKind::Phase => node.name.blue().bold().to_string(),
                    NodeKind::Item(ItemStatus::Done) => node.name.green().to_string(),
                    NodeKind::Item(ItemStatus::Active) => node.name.cyan().bold().to_string(),
                    NodeKind::Item(ItemStatus::Suspended) => node.name.yellow().to_string(),
                    NodeKind::Item(ItemStatus::Blocked) => node.name.red().to_string(),
                    NodeKind::Item(ItemStatus::Pending) | NodeKind::Other => node.name.clone(),
                }
            } else {
                node.name.clone()
            };

            let suffix = node
                .suffix
                .as_ref()
                .map(|s| {
                    if use_colors {
                        format!(" {}", s.dimmed())
                    } else {
                        format!(" {}", s)
                    }
                })
                .unwrap_or_default();

            lines.push(format!("{}{}{}{}", prefix, connector, name_str, suffix));

            if !node.children.is_empty() {
                Self::format_nodes(&node.children, config, &child_prefix, lines);
            }
        }
    }
}

/// One labelled node of an explicit tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub name: String,
    /// Decides the color
    pub kind: NodeKind,
    /// Dimmed text after the name, such as an item id
    pub suffix: Option<String>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            suffix: None,
            children: Vec::new(),
        }
    }

    pub fn with_suffix(self, suffix: impl Into<String>) -> Self {
        Self {
            suffix: Some(suffix.into()),
            ..self
        }
    }

    pub fn with_children(self, children: Vec<TreeNode>) -> Self {
        Self { children, ..self }
    }
}

/// What a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeKind {
    /// Phase heading
    Phase,
    /// Roadmap item, colored by status
    Item(ItemStatus),
    #[default]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Summary {
        phase: String,
        items: Vec<String>,
    }

    #[test]
    fn test_format_simple_object() {
        let data = Summary {
            phase: "Training".to_string(),
            items: vec!["a".to_string(), "b".to_string()],
        };
        let config = OutputConfig::new(super::super::OutputFormat::Tree).without_colors();
        let output = TreeOutput::format(&data, &config);

        assert!(output.contains("phase: Training"));
        assert!(output.contains("items [2]"));
        assert!(output.contains("\u{2514}\u{2500}\u{2500} b"));
    }

    #[test]
    fn test_from_nodes() {
        let children = vec![
            TreeNode::new("Phase 1", NodeKind::Phase).with_children(vec![
                TreeNode::new("[x] Design", NodeKind::Item(ItemStatus::Done))
                    .with_suffix("[design]")
                    .with_children(vec![TreeNode::new(
                        "[>] Implement",
                        NodeKind::Item(ItemStatus::Active),
                    )]),
            ]),
            TreeNode::new("General", NodeKind::Phase),
        ];

        let config = OutputConfig::new(super::super::OutputFormat::Tree).without_colors();
        let output = TreeOutput::from_nodes("Roadmap", &children, &config);

        let expected = "\
Roadmap
\u{251c}\u{2500}\u{2500} Phase 1
\u{2502}   \u{2514}\u{2500}\u{2500} [x] Design [design]
\u{2502}       \u{2514}\u{2500}\u{2500} [>] Implement
\u{2514}\u{2500}\u{2500} General";
        assert_eq!(output, expected);
    }
}
