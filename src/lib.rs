//! beanmock library
//!
//! Command implementations behind the `beanmock` binary: load a bean schema
//! (with an optional `settings:` block), generate random object graphs for a
//! type and print them as JSON.
//!
//! # CLI Usage
//!
//! ```bash
//! # Validate a schema
//! beanmock check --schema beans.yaml
//!
//! # Three reproducible Customer graphs, pretty printed
//! beanmock generate --schema beans.yaml --type Customer --seed 42 --count 3 --pretty
//!
//! # Self-referencing beans need cycle protection
//! beanmock generate --schema beans.yaml --type Node --enable-circle
//!
//! # Any type expression works, including containers and generic beans
//! beanmock generate --schema beans.yaml --type "map<string, list<Page<Node>>>"
//! ```

use anyhow::Context;
use clap::Args;
use mock_core::{BeanSchema, TypeDescriptor};
use mock_generator::{mock_type, MockConfig, MockSettings};
use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod render;

#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    /// Path to the bean schema YAML file
    #[arg(long)]
    pub schema: PathBuf,

    /// Type to generate, e.g. `Customer`, `int` or `list<Node>`
    #[arg(long = "type", value_name = "TYPE")]
    pub type_name: String,

    /// RNG seed; overrides `settings.seed` from the schema file
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of values to generate
    #[arg(long, default_value = "1")]
    pub count: usize,

    /// Reuse instances of a type already under construction
    #[arg(long)]
    pub enable_circle: bool,

    /// Pretty-print each JSON document
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Clone, Debug)]
pub struct CheckArgs {
    /// Path to the bean schema YAML file
    #[arg(long)]
    pub schema: PathBuf,
}

/// The optional `settings:` block of a schema file.
#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    #[serde(default)]
    settings: MockSettings,
}

/// Load and validate a schema file together with its settings block.
pub fn load_schema_file(path: &Path) -> anyhow::Result<(BeanSchema, MockSettings)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema file {path:?}"))?;
    let schema = BeanSchema::from_yaml(&content)
        .with_context(|| format!("Failed to parse schema from {path:?}"))?;
    schema
        .validate()
        .with_context(|| format!("Invalid schema in {path:?}"))?;
    let section: SettingsSection = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse settings from {path:?}"))?;
    Ok((schema, section.settings))
}

/// Generate `count` values and write one JSON document per value.
pub fn run_generate<W: Write>(args: &GenerateArgs, out: &mut W) -> anyhow::Result<()> {
    let (schema, mut settings) = load_schema_file(&args.schema)?;
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    if args.enable_circle {
        settings.enabled_circle = true;
    }

    let descriptor: TypeDescriptor = args
        .type_name
        .parse()
        .with_context(|| format!("Invalid --type '{}'", args.type_name))?;

    tracing::info!(
        "Generating {} value(s) of {} (seed={:?}, enabled_circle={})",
        args.count,
        descriptor,
        settings.seed,
        settings.enabled_circle
    );

    let mut config = MockConfig::from_settings(settings).with_schema(schema);
    for index in 0..args.count {
        let value = mock_type(&descriptor, &mut config)
            .with_context(|| format!("Failed to generate {descriptor} (value {index})"))?;
        let json = render::to_json(&value);
        render::release(&value);

        if args.pretty {
            serde_json::to_writer_pretty(&mut *out, &json)?;
        } else {
            serde_json::to_writer(&mut *out, &json)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Validate a schema file and print a summary.
pub fn run_check<W: Write>(args: &CheckArgs, out: &mut W) -> anyhow::Result<()> {
    let (schema, settings) = load_schema_file(&args.schema)?;
    writeln!(
        out,
        "Schema OK: {} bean(s), {} enum(s)",
        schema.beans.len(),
        schema.enums.len()
    )?;
    writeln!(out, "Beans: {}", schema.bean_names().join(", "))?;
    tracing::debug!("Effective settings: {:?}", settings);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    const SCHEMA: &str = r#"
version: 1
settings:
  int_range: { min: 3, max: 3 }
  seed: 1
beans:
  - name: Node
    fields:
      - name: next
        type: Node
      - name: value
        type: int
enums:
  - name: Color
    variants: [RED]
"#;

    fn schema_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn generate_args(schema: &Path, type_name: &str) -> GenerateArgs {
        GenerateArgs {
            schema: schema.to_path_buf(),
            type_name: type_name.to_string(),
            seed: None,
            count: 1,
            enable_circle: true,
            pretty: false,
        }
    }

    #[test]
    fn test_settings_block_is_applied() {
        let file = schema_file(SCHEMA);
        let (schema, settings) = load_schema_file(file.path()).unwrap();
        assert_eq!(schema.bean_names(), vec!["Node"]);
        assert_eq!(settings.int_range.min, 3);
        assert_eq!(settings.seed, Some(1));
    }

    #[test]
    fn test_generate_cyclic_bean() {
        let file = schema_file(SCHEMA);
        let mut out = Vec::new();
        run_generate(&generate_args(file.path(), "Node"), &mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "$type": "Node", "next": { "$ref": "Node" }, "value": 3 })
        );
    }

    #[test]
    fn test_generate_count_and_containers() {
        let file = schema_file(SCHEMA);
        let mut args = generate_args(file.path(), "list<Color>");
        args.count = 3;
        let mut out = Vec::new();
        run_generate(&args, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in lines {
            let json: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(json.as_array().unwrap().iter().all(|v| v == "RED"));
        }
    }

    #[test]
    fn test_generate_reports_unsupported_type() {
        let file = schema_file(SCHEMA);
        let mut out = Vec::new();
        let err = run_generate(&generate_args(file.path(), "Ghost"), &mut out).unwrap_err();
        assert!(format!("{err:#}").contains("Unsupported type: Ghost"));
    }

    #[test]
    fn test_check_rejects_unknown_parent() {
        let file = schema_file(
            "beans:\n  - name: Child\n    extends: Missing\n    fields: []\n",
        );
        let err = run_check(
            &CheckArgs {
                schema: file.path().to_path_buf(),
            },
            &mut Vec::new(),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("unknown parent"));
    }

    #[test]
    fn test_check_summary() {
        let file = schema_file(SCHEMA);
        let mut out = Vec::new();
        run_check(
            &CheckArgs {
                schema: file.path().to_path_buf(),
            },
            &mut out,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Schema OK: 1 bean(s), 1 enum(s)"));
    }
}
