// Template module for slot-filling text templates
//
// Templates are plain strings with `{slot}` placeholders. Parsing turns them
// into a list of literal and slot parts; resolution fills each slot from a
// caller-supplied lookup.

mod ast;
mod parser;
mod resolver;

pub use ast::{Template, TemplatePart};
pub use parser::TemplateParser;
pub use resolver::TemplateResolver;
