#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Register,
    Options,
    Config,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "register" => CliVerb::Register,
        "options" => CliVerb::Options,
        "config" => CliVerb::Config,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  register                             Run the student registration wizard".to_string(),
        "  options                              List branch and caste category codes".to_string(),
        "  config show                          Print the effective settings".to_string(),
        "  config init                          Write default settings if none exist".to_string(),
        "  help                                 Show this help".to_string(),
    ]
}

pub(crate) fn help_text() -> String {
    let mut lines = cli_help_lines();
    lines.push(String::new());
    lines.push("Environment:".to_string());
    lines.push(
        "  POLYREG_SCRIPT_KEYS                  Drive `register` from comma-separated keys"
            .to_string(),
    );
    lines.push(
        "  POLYREG_CONFIG                       Settings file path (default ~/.polyreg/config.yaml)"
            .to_string(),
    );
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_aliases_map_to_help_verb() {
        assert_eq!(parse_cli_verb("help"), CliVerb::Help);
        assert_eq!(parse_cli_verb("--help"), CliVerb::Help);
        assert_eq!(parse_cli_verb("regsiter"), CliVerb::Unknown);
    }
}
