use crate::dialect::Dialect;

/// ANSI-flavoured output using the base rules only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Standard;

impl Dialect for Standard {
    fn name(&self) -> &'static str {
        "Standard"
    }
}
