use crate::decoder::Decoded;
use crate::instructions::Format;

/// Renders in the assembler's own operand order, so the output reassembles
/// (branch offsets stay numeric).
pub fn fmt_decoded(d: &Decoded) -> String {
    let mn = d.op.mnemonic();
    match d.op.format() {
        Format::R => format!("{} {} {} {}", mn, d.reg_a, d.reg_b, d.dest),
        Format::I => format!("{} {} {} {}", mn, d.reg_a, d.reg_b, d.offset),
        Format::J => format!("{} {} {}", mn, d.reg_a, d.reg_b),
        Format::O => mn.to_string(),
    }
}

/// Words that do not decode are shown as data.
pub fn fmt_word(decoded: Option<&Decoded>, word: i32) -> String {
    match decoded {
        Some(d) => fmt_decoded(d),
        None => format!(".fill {}", word),
    }
}
