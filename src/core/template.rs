//! Record templates
//!
//! A template is compiled once when a format is installed and executed for
//! every record. Actions are delimited by `{{` and `}}`:
//!
//! - `{{.Timestamp}}`, `{{.Namespace}}`, `{{.Level}}`, `{{.Message}}` substitute
//!   the record fields
//! - `{{if .Field}}...{{else}}...{{end}}` renders a branch depending on whether
//!   the field is non-empty
//! - `{{"text"}}` emits a quoted literal, which may itself contain `}}`
//! - `{{/* comment */}}` emits nothing
//! - a `-` next to the delimiter (`{{- .Level -}}`) trims adjacent whitespace
//!
//! Anything outside an action is copied verbatim.

use super::error::{LoggerError, Result};
use super::record::Record;
use std::fmt;
use std::str::FromStr;

/// Template used when none is configured
pub const DEFAULT_FORMAT: &str = "[{{.Timestamp}}] {{.Namespace}} {{.Level}}: {{.Message}}";

/// Record fields a template can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Timestamp,
    Namespace,
    Level,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::Timestamp,
        Field::Namespace,
        Field::Level,
        Field::Message,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Timestamp => "Timestamp",
            Field::Namespace => "Namespace",
            Field::Level => "Level",
            Field::Message => "Message",
        }
    }

    fn lookup(name: &str) -> Option<Field> {
        Self::ALL.iter().copied().find(|field| field.as_str() == name)
    }

    fn value<'r>(self, record: &'r Record<'_>) -> &'r str {
        match self {
            Field::Timestamp => &record.timestamp,
            Field::Namespace => record.namespace,
            Field::Level => record.level.tag(),
            Field::Message => record.message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Text(String),
    Field(Field),
    If {
        field: Field,
        then: Vec<Node>,
        otherwise: Vec<Node>,
    },
}

/// A compiled format template.
///
/// # Examples
///
/// ```
/// use named_logger::{Level, Record, Template};
///
/// let template = Template::compile("{{.Level}} {{.Namespace}}: {{.Message}}").unwrap();
/// let record = Record::new(String::new(), "db", Level::WARNING, "slow query\n");
/// assert_eq!(template.render(&record), "WARN db: slow query\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    nodes: Vec<Node>,
}

impl Template {
    /// Compile a template string.
    ///
    /// Fails with [`LoggerError::InvalidTemplate`] on unclosed actions, unknown
    /// fields, unbalanced `if`/`else`/`end` or unsupported actions.
    pub fn compile(source: &str) -> Result<Self> {
        let nodes = Parser::new(source).parse()?;
        Ok(Self {
            source: source.to_string(),
            nodes,
        })
    }

    /// The default `[{{.Timestamp}}] {{.Namespace}} {{.Level}}: {{.Message}}`
    /// template, built without going through the parser.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            source: DEFAULT_FORMAT.to_string(),
            nodes: vec![
                Node::Text("[".to_string()),
                Node::Field(Field::Timestamp),
                Node::Text("] ".to_string()),
                Node::Field(Field::Namespace),
                Node::Text(" ".to_string()),
                Node::Field(Field::Level),
                Node::Text(": ".to_string()),
                Node::Field(Field::Message),
            ],
        }
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Execute the template against a record
    #[must_use]
    pub fn render(&self, record: &Record<'_>) -> String {
        let mut out =
            String::with_capacity(self.source.len() + record.message.len() + record.timestamp.len());
        render_nodes(&self.nodes, record, &mut out);
        out
    }
}

fn render_nodes(nodes: &[Node], record: &Record<'_>, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Field(field) => out.push_str(field.value(record)),
            Node::If {
                field,
                then,
                otherwise,
            } => {
                let branch = if field.value(record).is_empty() {
                    otherwise
                } else {
                    then
                };
                render_nodes(branch, record, out);
            }
        }
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::standard()
    }
}

impl FromStr for Template {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::compile(s)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// An `{{if}}` whose `{{end}}` has not been seen yet
struct OpenBranch {
    field: Field,
    then: Vec<Node>,
    otherwise: Option<Vec<Node>>,
    opened_at: usize,
}

struct Parser<'s> {
    source: &'s str,
    root: Vec<Node>,
    open: Vec<OpenBranch>,
    trim_next: bool,
}

impl<'s> Parser<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            root: Vec::new(),
            open: Vec::new(),
            trim_next: false,
        }
    }

    fn parse(mut self) -> Result<Vec<Node>> {
        let src = self.source;
        let mut cursor = 0;

        while let Some(rel) = src[cursor..].find("{{") {
            let open = cursor + rel;
            self.push_text(&src[cursor..open]);

            let body_start = open + 2;
            let close = action_end(src, body_start)
                .ok_or_else(|| LoggerError::template(open, "unclosed action"))?;

            self.action(open, &src[body_start..close])?;
            cursor = close + 2;
        }
        self.push_text(&src[cursor..]);

        if let Some(branch) = self.open.last() {
            return Err(LoggerError::template(
                branch.opened_at,
                "unexpected end of template, missing {{end}}",
            ));
        }
        Ok(self.root)
    }

    /// Nodes are appended to the innermost open branch, or the root
    fn target(&mut self) -> &mut Vec<Node> {
        match self.open.last_mut() {
            Some(branch) => match branch.otherwise.as_mut() {
                Some(otherwise) => otherwise,
                None => &mut branch.then,
            },
            None => &mut self.root,
        }
    }

    fn push_text(&mut self, text: &str) {
        let text = if std::mem::take(&mut self.trim_next) {
            text.trim_start()
        } else {
            text
        };
        self.push_literal(text);
    }

    fn push_literal(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let target = self.target();
        match target.last_mut() {
            Some(Node::Text(prev)) => prev.push_str(text),
            _ => target.push(Node::Text(text.to_string())),
        }
    }

    fn trim_previous(&mut self) {
        let target = self.target();
        if let Some(Node::Text(prev)) = target.last_mut() {
            let len = prev.trim_end().len();
            prev.truncate(len);
            if prev.is_empty() {
                target.pop();
            }
        }
    }

    fn action(&mut self, position: usize, body: &str) -> Result<()> {
        let mut body = body;

        if let Some(stripped) = body.strip_prefix('-') {
            if stripped.starts_with(char::is_whitespace) {
                self.trim_previous();
                body = stripped;
            }
        }

        let mut trim_after = false;
        if let Some(stripped) = body.strip_suffix('-') {
            if stripped.ends_with(char::is_whitespace) {
                trim_after = true;
                body = stripped;
            }
        }

        self.command(position, body.trim())?;
        self.trim_next = trim_after;
        Ok(())
    }

    fn command(&mut self, position: usize, body: &str) -> Result<()> {
        if body.is_empty() {
            return Err(LoggerError::template(position, "missing value for command"));
        }

        if body.starts_with("/*") {
            if body.len() >= 4 && body.ends_with("*/") {
                return Ok(());
            }
            return Err(LoggerError::template(position, "unclosed comment"));
        }

        if let Some(name) = body.strip_prefix('.') {
            let field = Self::field(position, name)?;
            self.target().push(Node::Field(field));
            return Ok(());
        }

        if body.starts_with('"') {
            let text = unquote(position, body)?;
            self.push_literal(&text);
            return Ok(());
        }

        let (keyword, arg) = match body.split_once(char::is_whitespace) {
            Some((keyword, arg)) => (keyword, arg.trim()),
            None => (body, ""),
        };

        match keyword {
            "if" => {
                let name = arg.strip_prefix('.').ok_or_else(|| {
                    LoggerError::template(position, format!("if expects a field, got {:?}", arg))
                })?;
                let field = Self::field(position, name)?;
                self.open.push(OpenBranch {
                    field,
                    then: Vec::new(),
                    otherwise: None,
                    opened_at: position,
                });
                Ok(())
            }
            "else" => {
                Self::no_arguments(position, keyword, arg)?;
                let branch = self
                    .open
                    .last_mut()
                    .ok_or_else(|| LoggerError::template(position, "unexpected {{else}}"))?;
                if branch.otherwise.is_some() {
                    return Err(LoggerError::template(position, "duplicate {{else}}"));
                }
                branch.otherwise = Some(Vec::new());
                Ok(())
            }
            "end" => {
                Self::no_arguments(position, keyword, arg)?;
                let branch = self
                    .open
                    .pop()
                    .ok_or_else(|| LoggerError::template(position, "unexpected {{end}}"))?;
                let node = Node::If {
                    field: branch.field,
                    then: branch.then,
                    otherwise: branch.otherwise.unwrap_or_default(),
                };
                self.target().push(node);
                Ok(())
            }
            _ => Err(LoggerError::template(
                position,
                format!("unsupported action {:?}", body),
            )),
        }
    }

    fn field(position: usize, name: &str) -> Result<Field> {
        Field::lookup(name)
            .ok_or_else(|| LoggerError::template(position, format!("unknown field {:?}", name)))
    }

    fn no_arguments(position: usize, keyword: &str, arg: &str) -> Result<()> {
        if arg.is_empty() {
            Ok(())
        } else {
            Err(LoggerError::template(
                position,
                format!("unexpected arguments to {}: {:?}", keyword, arg),
            ))
        }
    }
}

/// Byte offset of the `}}` closing the action whose body starts at `start`.
///
/// Delimiters inside quoted literals and comments do not close the action.
fn action_end(src: &str, start: usize) -> Option<usize> {
    let body = &src[start..];
    let lead = body.strip_prefix('-').unwrap_or(body).trim_start();
    if lead.starts_with("/*") {
        let offset = body.len() - lead.len();
        let after_comment = offset + lead.find("*/")? + 2;
        return body[after_comment..]
            .find("}}")
            .map(|rel| start + after_comment + rel);
    }

    let mut in_quote = false;
    let mut escaped = false;
    for (idx, c) in body.char_indices() {
        if in_quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_quote = false;
            }
        } else if c == '"' {
            in_quote = true;
        } else if body[idx..].starts_with("}}") {
            return Some(start + idx);
        }
    }
    None
}

fn unquote(position: usize, quoted: &str) -> Result<String> {
    let inner = quoted
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(|| LoggerError::template(position, "unterminated quoted string"))?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('\\') => out.push('\\'),
                Some('"') => out.push('"'),
                other => {
                    return Err(LoggerError::template(
                        position,
                        format!("invalid escape \\{}", other.map(String::from).unwrap_or_default()),
                    ))
                }
            },
            '"' => {
                return Err(LoggerError::template(
                    position,
                    "unescaped quote inside string",
                ))
            }
            _ => out.push(c),
        }
    }
    Ok(out)
}
