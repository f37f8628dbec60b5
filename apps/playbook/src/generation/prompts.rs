// Prompt constants for playbook generation.
// Rendered with handlebars by `builder::build_prompt`; values are not escaped.

/// Shown in place of the company name when the user leaves it blank.
pub const COMPANY_PLACEHOLDER: &str = "[Your Company]";

/// Playbook prompt template.
/// Replace: {{product}}, {{company}}, {{query}}, {{tone}}, {{tone_guidance}},
///          {{priority}}, {{escalation_guidance}}
pub const PLAYBOOK_PROMPT_TEMPLATE: &str = r#"Strictly follow these inputs to generate a customer support playbook:
- Product/Service: '{{product}}'
- Company: '{{company}}'
- Customer Query: '{{query}}'
- Tone: {{tone}}
- Priority: {{priority}}

Create a detailed playbook with these sections:
1. **Greeting**: A warm, branded welcome specific to '{{company}}'.
2. **Acknowledgment**: Recognize the '{{query}}' issue in a {{tone}} tone ({{tone_guidance}}).
3. **Solution**: Provide a clear, product-specific resolution related to '{{product}}'.
4. **Closing**: End with a positive {{tone}} message and CTA.
5. **Escalation Guide**: Steps to escalate based on {{priority}} priority. {{escalation_guidance}}
6. Provide a 100-word advance settlement reply that is understandable and helpful for users about: {{query}}.
7. Your tone should be formal and respectful toward users."#;
