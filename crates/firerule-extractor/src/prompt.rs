//! LLM prompt engineering for rule extraction

use firerule_domain::{Parameter, Rule};

/// Sample clause used as the default worked example
pub const EXAMPLE_CLAUSE: &str =
    "6.1.1 当高层厂房屋顶承重结构耐火极限低于1h时，防火墙应高出屋面0.5m以上";

/// One input/output pair shown to the model
#[derive(Debug, Clone)]
pub struct WorkedExample {
    /// Source clause text
    pub input: String,
    /// Rule the clause should map to
    pub output: Rule,
}

impl Default for WorkedExample {
    fn default() -> Self {
        Self {
            input: EXAMPLE_CLAUSE.to_string(),
            output: Rule {
                clause: "GB50016-6.1.1".to_string(),
                parameter: Parameter::WallHeight,
                condition: "高层厂房:>=0.5".to_string(),
                unit: "m".to_string(),
                note: Some("当屋顶耐火极限<1h时生效".to_string()),
            },
        }
    }
}

/// Builds prompts for the LLM to extract rules
pub struct PromptBuilder {
    text: String,
    example: WorkedExample,
}

impl PromptBuilder {
    /// Create a new prompt builder for filtered regulation text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            example: WorkedExample::default(),
        }
    }

    /// Replace the worked example
    pub fn with_example(mut self, example: WorkedExample) -> Self {
        self.example = example;
        self
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Instruction and target schema
        prompt.push_str("请将以下防火规范转换为JSON数组，严格按此格式：\n");
        prompt.push_str(&Self::schema());
        prompt.push_str("\n\n");

        // 2. Worked example
        prompt.push_str("示例转换：\n");
        prompt.push_str(&format!("输入：{}\n", self.example.input));
        prompt.push_str("输出：\n");
        prompt.push_str(&self.example_output());
        prompt.push_str("\n\n");

        // 3. The text to convert
        prompt.push_str("待解析文本：\n");
        prompt.push_str(&self.text);

        prompt
    }

    /// The target schema with field descriptions in place of values
    fn schema() -> String {
        let parameters = Parameter::KNOWN
            .iter()
            .map(Parameter::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            r#"{{
  "rules": [
    {{
      "clause": "条款号（如GB50016-6.1.1）",
      "parameter": "参数名（从{}中选择）",
      "condition": "条件表达式（包含建筑类型时使用'建筑类型:条件'格式）",
      "unit": "单位",
      "note": "特殊说明（可选）"
    }}
  ]
}}"#,
            parameters
        )
    }

    fn example_output(&self) -> String {
        // A Rule always serializes; fall back to Debug rather than panic
        serde_json::to_string_pretty(&self.example.output)
            .unwrap_or_else(|_| format!("{:?}", self.example.output))
    }
}
