/// A symbol after merge: its value is section-relative; `resolved_address`
/// is filled in during address assignment.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GlobalSymbol {
    pub section: String,
    pub value: u32,
    pub resolved_address: Option<u32>,
}
