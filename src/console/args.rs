/// Splits process arguments into `(flag, value)` pairs.
///
/// `-x` (one letter) and `--name` start a flag. The following token is the
/// flag's value unless it is itself a flag; a bare flag gets an empty value.
/// Negative numbers count as values. Tokens that belong to no flag are
/// dropped.
pub fn parse_command_line_args<I, S>(args: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let tokens: Vec<S> = args.into_iter().collect();
    let mut parsed = Vec::new();
    let mut index = 0;

    while index < tokens.len() {
        let token = tokens[index].as_ref();
        index += 1;

        let Some(flag) = flag_name(token) else {
            continue;
        };

        let value = match tokens.get(index).map(AsRef::<str>::as_ref) {
            Some(next) if flag_name(next).is_none() => {
                index += 1;
                next.to_string()
            }
            _ => String::new(),
        };

        parsed.push((flag.to_string(), value));
    }

    parsed
}

fn flag_name(token: &str) -> Option<&str> {
    if token.parse::<f64>().is_ok() {
        return None;
    }

    if let Some(long) = token.strip_prefix("--") {
        return (!long.is_empty()).then_some(long);
    }

    let short = token.strip_prefix('-')?;
    (short.chars().count() == 1).then_some(short)
}
