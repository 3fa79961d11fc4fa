//! Text layout for the open create/edit form.

use crate::console::models::FormModel;

pub const FORM_FOOTER: &str = "set <field> <value> | save | cancel";

pub fn form_lines(form: &FormModel) -> Vec<String> {
    let mut lines = vec![form.title().to_string(), "=".repeat(form.title().len())];
    lines.extend(
        form.visible_fields()
            .map(|field| format!("{} ({}): {}", field.spec.label, field.spec.name, field.value)),
    );
    lines.push(FORM_FOOTER.to_string());
    lines
}
