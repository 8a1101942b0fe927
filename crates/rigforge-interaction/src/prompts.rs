//! Prompt templates and response schemas for the Gemini gateway.

use minijinja::{Environment, context};
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{Value, json};

use rigforge_core::gateway::{CompatibilityPart, PerformancePart};

const COMPATIBILITY_TEMPLATE: &str = "\
Analyze the compatibility of this list of PC components. Check the CPU and \
motherboard socket, power supply headroom, RAM type and physical fit where \
possible.

List:
{% for part in parts %}{{ part.category }}: {{ part.name }} ({{ part.spec_text }})
{% endfor %}";

const PERFORMANCE_TEMPLATE: &str = "\
Estimate the performance of this PC based on well-known benchmarks. Give \
gaming and workstation scores from 0 to 100, the main bottleneck, and \
estimated FPS for popular games ({{ games | join(\", \") }}).

List:
{% for part in parts %}{{ part.category }}: {{ part.name }}
{% endfor %}";

const FORUM_TEMPLATE: &str = "\
Act as an experienced member of a PC hardware forum. Give a short, \
constructive and slightly informal opinion about this build:
{{ build }}";

/// Text sent with a scanned image.
pub const IDENTIFY_PROMPT: &str = "Identify this PC hardware component. Return JSON with \
'name' (likely product name), 'type' (component type, e.g. GPU, CPU) and 'specs' \
(estimated specifications). Respond with JSON only.";

/// Games the performance estimate asks about.
pub const BENCHMARK_GAMES: [&str; 3] = ["Cyberpunk 2077", "Fortnite", "COD"];

static TEMPLATES: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    for (name, source) in [
        ("compatibility", COMPATIBILITY_TEMPLATE),
        ("performance", PERFORMANCE_TEMPLATE),
        ("forum", FORUM_TEMPLATE),
    ] {
        if let Err(e) = env.add_template(name, source) {
            tracing::error!(template = name, error = %e, "invalid prompt template");
        }
    }
    env
});

#[derive(Serialize)]
struct PromptLine<'a> {
    category: String,
    name: &'a str,
    spec_text: &'a str,
}

fn render(name: &str, ctx: minijinja::Value) -> Result<String, minijinja::Error> {
    TEMPLATES.get_template(name)?.render(ctx)
}

pub fn compatibility_prompt(parts: &[CompatibilityPart]) -> Result<String, minijinja::Error> {
    let lines: Vec<PromptLine<'_>> = parts
        .iter()
        .map(|p| PromptLine {
            category: p.category.to_string(),
            name: &p.name,
            spec_text: &p.spec_text,
        })
        .collect();
    render("compatibility", context! { parts => lines })
}

pub fn performance_prompt(parts: &[PerformancePart]) -> Result<String, minijinja::Error> {
    let lines: Vec<PromptLine<'_>> = parts
        .iter()
        .map(|p| PromptLine {
            category: p.category.to_string(),
            name: &p.name,
            spec_text: "",
        })
        .collect();
    render(
        "performance",
        context! { parts => lines, games => BENCHMARK_GAMES },
    )
}

pub fn forum_prompt(build: &str) -> Result<String, minijinja::Error> {
    render("forum", context! { build => build })
}

pub fn compatibility_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "compatible": {
                "type": "BOOLEAN",
                "description": "True if all components are compatible."
            },
            "issues": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Incompatibility issues found. Empty if compatible."
            },
            "recommendations": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Suggestions to improve the build."
            }
        },
        "required": ["compatible", "issues"]
    })
}

pub fn performance_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "gamingScore": { "type": "NUMBER", "description": "Gaming score from 0 to 100" },
            "workstationScore": { "type": "NUMBER", "description": "Workstation score from 0 to 100" },
            "bottleneck": { "type": "STRING", "description": "The main bottleneck component" },
            "estimatedFPS": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "game": { "type": "STRING" },
                        "fps": { "type": "NUMBER" }
                    }
                }
            }
        },
        "required": ["gamingScore", "workstationScore", "bottleneck"]
    })
}

pub fn identification_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING" },
            "type": { "type": "STRING" },
            "specs": { "type": "STRING" }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigforge_core::component::ComponentCategory;

    #[test]
    fn test_compatibility_prompt_lists_parts() {
        let parts = vec![
            CompatibilityPart {
                category: ComponentCategory::Cpu,
                name: "Ryzen 7 7800X3D".to_string(),
                spec_text: "AM5, 8 cores".to_string(),
            },
            CompatibilityPart {
                category: ComponentCategory::Motherboard,
                name: "Z790 Hero".to_string(),
                spec_text: "LGA1700".to_string(),
            },
        ];
        let prompt = compatibility_prompt(&parts).unwrap();
        assert!(prompt.contains("Processor: Ryzen 7 7800X3D (AM5, 8 cores)\n"));
        assert!(prompt.contains("Motherboard: Z790 Hero (LGA1700)"));
    }

    #[test]
    fn test_performance_prompt_names_games() {
        let parts = vec![PerformancePart {
            category: ComponentCategory::Gpu,
            name: "RTX 4070".to_string(),
        }];
        let prompt = performance_prompt(&parts).unwrap();
        assert!(prompt.contains("Cyberpunk 2077, Fortnite, COD"));
        assert!(prompt.contains("Graphics Card: RTX 4070"));
    }

    #[test]
    fn test_forum_prompt_embeds_build() {
        let prompt = forum_prompt("RTX 4090, i9-14900K").unwrap();
        assert!(prompt.ends_with("RTX 4090, i9-14900K"));
    }

    #[test]
    fn test_schemas_require_core_fields() {
        assert_eq!(compatibility_schema()["required"], json!(["compatible", "issues"]));
        assert_eq!(
            performance_schema()["required"],
            json!(["gamingScore", "workstationScore", "bottleneck"])
        );
        assert!(identification_schema().get("required").is_none());
    }
}
