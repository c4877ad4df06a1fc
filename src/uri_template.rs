//! URI template matching
//!
//! Compiles an RFC 6570 template such as `users://{id}/posts{?page,limit}` into an
//! anchored regular expression, then reverses concrete URIs back into variable
//! bindings. Supported operators: simple, `+`, `#`, `/`, `.`, `;`, `?`, `&`, and the
//! `:n` prefix modifier. The explode modifier (`*`) cannot be reversed into a single
//! string value and is rejected when the template is parsed.
//!
//! Query expressions (`{?..}`, `{&..}`) capture the whole query string and bind
//! variables by key, so parameters may appear in any order and unknown keys are
//! ignored. The first `{?..}` expression must start with `?`.

use {
    crate::error::{McpError, McpResult},
    regex::Regex,
    serde_json::{Map, Value},
    std::fmt,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Simple,
    Reserved,
    Fragment,
    Label,
    PathSegment,
    PathParam,
    Query,
    QueryContinuation,
}

impl Operator {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Reserved),
            '#' => Some(Self::Fragment),
            '.' => Some(Self::Label),
            '/' => Some(Self::PathSegment),
            ';' => Some(Self::PathParam),
            '?' => Some(Self::Query),
            '&' => Some(Self::QueryContinuation),
            _ => None,
        }
    }

    /// Characters a captured value may contain
    fn value_class(self) -> &'static str {
        match self {
            Self::Simple => "[^/?#,]",
            Self::Reserved => "[^?#,]",
            Self::Fragment => "[^,]",
            Self::Label => "[^/?#.]",
            Self::PathSegment => "[^/?#]",
            Self::PathParam => "[^/?#;]",
            Self::Query | Self::QueryContinuation => "[^#]",
        }
    }
}

#[derive(Debug, Clone)]
struct VarSpec {
    name: String,
    max_len: Option<usize>,
}

/// What one regex capture group binds
#[derive(Debug, Clone)]
enum Group {
    Value(String),
    Query(Vec<VarSpec>),
}

/// A compiled URI template
#[derive(Debug, Clone)]
pub struct UriTemplate {
    template: String,
    pattern: Regex,
    groups: Vec<Group>,
    variables: Vec<String>,
}

impl UriTemplate {
    /// Compile `template`. Malformed templates fail here, never at match time.
    pub fn parse(template: &str) -> McpResult<Self> {
        let invalid = |reason: &str| McpError::InvalidTemplate {
            template: template.to_string(),
            reason: reason.to_string(),
        };

        let mut pattern = String::from("^");
        let mut groups = Vec::new();
        let mut variables = Vec::new();
        let mut rest = template;

        while !rest.is_empty() {
            match rest.find(['{', '}']) {
                None => {
                    pattern.push_str(&regex::escape(rest));
                    break;
                }
                Some(idx) if rest[idx..].starts_with('}') => {
                    return Err(invalid("unmatched '}'"));
                }
                Some(idx) => {
                    pattern.push_str(&regex::escape(&rest[..idx]));
                    let after = &rest[idx + 1..];
                    let close = after.find('}').ok_or_else(|| invalid("unclosed expression"))?;
                    let expression = &after[..close];
                    if expression.contains('{') {
                        return Err(invalid("nested '{'"));
                    }
                    compile_expression(expression, &mut pattern, &mut groups, &mut variables).map_err(|r| invalid(&r))?;
                    rest = &after[close + 1..];
                }
            }
        }
        pattern.push('$');

        let pattern = Regex::new(&pattern).map_err(|e| invalid(&e.to_string()))?;
        Ok(Self {
            template: template.to_string(),
            pattern,
            groups,
            variables,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Variable names in template order
    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(String::as_str)
    }

    /// Match a concrete URI, returning the percent-decoded variable bindings.
    ///
    /// Variables in optional expressions that are absent from the URI are omitted.
    pub fn matches(&self, uri: &str) -> Option<Map<String, Value>> {
        let captures = self.pattern.captures(uri)?;
        let mut bindings = Map::new();
        let mut query_pairs = Vec::new();

        for (idx, group) in self.groups.iter().enumerate() {
            let Some(m) = captures.get(idx + 1) else {
                continue;
            };
            match group {
                Group::Value(name) => {
                    bindings.insert(name.clone(), Value::String(percent_decode(m.as_str())));
                }
                Group::Query(_) => query_pairs.extend(
                    m.as_str()
                        .split('&')
                        .filter(|pair| !pair.is_empty())
                        .map(|pair| pair.split_once('=').unwrap_or((pair, ""))),
                ),
            }
        }

        let query_specs = self.groups.iter().filter_map(|group| match group {
            Group::Query(specs) => Some(specs),
            Group::Value(_) => None,
        });
        for spec in query_specs.flatten() {
            // first occurrence of a repeated key wins
            let Some((_, raw)) = query_pairs.iter().find(|(key, _)| *key == spec.name) else {
                continue;
            };
            let value = percent_decode(raw);
            if spec.max_len.is_some_and(|max| value.chars().count() > max) {
                return None;
            }
            bindings.insert(spec.name.clone(), Value::String(value));
        }
        Some(bindings)
    }
}

impl fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

fn compile_expression(
    expression: &str,
    pattern: &mut String,
    groups: &mut Vec<Group>,
    variables: &mut Vec<String>,
) -> Result<(), String> {
    let mut chars = expression.chars();
    let (operator, var_list) = match chars.next().and_then(Operator::from_char) {
        Some(op) => (op, chars.as_str()),
        None => (Operator::Simple, expression),
    };
    if var_list.is_empty() {
        return Err("empty expression".to_string());
    }

    let specs = var_list
        .split(',')
        .map(parse_var_spec)
        .collect::<Result<Vec<_>, _>>()?;

    let class = operator.value_class();
    if matches!(operator, Operator::Query | Operator::QueryContinuation) {
        let lead = if operator == Operator::Query { "\\?" } else { "&" };
        pattern.push_str(&format!("(?:{lead}({class}*))?"));
        variables.extend(specs.iter().map(|spec| spec.name.clone()));
        groups.push(Group::Query(specs));
        return Ok(());
    }

    for (i, spec) in specs.iter().enumerate() {
        let first = i == 0;
        let quantifier = |required: bool| match (spec.max_len, required) {
            (Some(n), true) => format!("{{1,{n}}}"),
            (Some(n), false) => format!("{{0,{n}}}"),
            (None, true) => "+".to_string(),
            (None, false) => "*".to_string(),
        };
        let name = regex::escape(&spec.name);

        let piece = match operator {
            Operator::Simple | Operator::Reserved if first => format!("({class}{})", quantifier(true)),
            Operator::Simple | Operator::Reserved => format!("(?:,({class}{}))?", quantifier(false)),
            Operator::Fragment if first => format!("#({class}{})", quantifier(true)),
            Operator::Fragment => format!("(?:,({class}{}))?", quantifier(false)),
            Operator::Label => format!("(?:\\.({class}{}))?", quantifier(false)),
            Operator::PathSegment => format!("(?:/({class}{}))?", quantifier(false)),
            Operator::PathParam => format!("(?:;{name}=?({class}{}))?", quantifier(false)),
            Operator::Query | Operator::QueryContinuation => continue,
        };
        pattern.push_str(&piece);
        groups.push(Group::Value(spec.name.clone()));
        variables.push(spec.name.clone());
    }
    Ok(())
}

fn parse_var_spec(spec: &str) -> Result<VarSpec, String> {
    if spec.ends_with('*') {
        return Err(format!("explode modifier is not supported in '{spec}'"));
    }

    let (name, max_len) = match spec.split_once(':') {
        Some((name, len)) => {
            let len: usize = len
                .parse()
                .map_err(|_| format!("invalid prefix length in '{spec}'"))?;
            if len == 0 || len > 9999 {
                return Err(format!("prefix length out of range in '{spec}'"));
            }
            (name, Some(len))
        }
        None => (spec, None),
    };

    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '%');
    if !valid {
        return Err(format!("invalid variable name '{name}'"));
    }

    Ok(VarSpec {
        name: name.to_string(),
        max_len,
    })
}

/// Decode `%XX` escapes; malformed escapes are kept literally.
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
            if let Some(byte) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}
