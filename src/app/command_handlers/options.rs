use crate::registration::DraftField;

pub fn cmd_options(args: &[String]) -> Result<String, String> {
    let fields: Vec<DraftField> = match args.first() {
        None => DraftField::ALL
            .into_iter()
            .filter(|field| field.is_choice())
            .collect(),
        Some(raw) => {
            let field = DraftField::parse(raw)?;
            if !field.is_choice() {
                return Err(format!(
                    "`{}` is free text and has no fixed options",
                    field.as_str()
                ));
            }
            vec![field]
        }
    };

    let mut lines = Vec::new();
    for field in fields {
        lines.push(format!("{}:", field.as_str()));
        for (code, description) in field.choice_codes().iter().zip(field.choice_options()) {
            lines.push(format!("  {code:8} {description}"));
        }
    }
    Ok(lines.join("\n"))
}
