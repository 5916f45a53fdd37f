use pretty::RcDoc;

pub fn to_pretty(doc: RcDoc<()>, width: usize) -> String {
    format!("{}", doc.pretty(width))
}
