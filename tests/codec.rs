use lc2k_rs::decoder::{Decoded, Decoder, Op};
use lc2k_rs::instructions::Format;
use lc2k_rs::isa::lc2k::{encode, fields, EncodeError, Lc2kDecoder};
use pretty_assertions::assert_eq;

#[test]
fn encode_then_decode_returns_fields() {
    let dec = Lc2kDecoder::new();
    let cases: &[(Op, i64, i64, i64)] = &[
        (Op::Add, 1, 2, 3),
        (Op::Nor, 7, 0, 7),
        (Op::Lw, 0, 1, 5),
        (Op::Sw, 5, 6, -32768),
        (Op::Beq, 3, 3, 32767),
        (Op::Beq, 0, 0, -1),
        (Op::Jalr, 4, 7, 0),
        (Op::Halt, 0, 0, 0),
        (Op::Noop, 0, 0, 0),
    ];
    for &(op, a, b, field) in cases {
        let w = encode(op, a, b, field).unwrap();
        let d = dec.decode(w).unwrap();
        let (dest, offset) = match op.format() {
            Format::R => (field as u8, 0),
            Format::I => (0, field as i32),
            _ => (0, 0),
        };
        assert_eq!(
            d,
            Decoded {
                op,
                reg_a: a as u8,
                reg_b: b as u8,
                dest,
                offset
            }
        );
    }
}

#[test]
fn known_words() {
    // lw 0 1 5, add 1 2 1, halt
    assert_eq!(encode(Op::Lw, 0, 1, 5).unwrap(), 8454149);
    assert_eq!(encode(Op::Add, 1, 2, 1).unwrap(), 655361);
    assert_eq!(encode(Op::Halt, 0, 0, 0).unwrap(), 25165824);
}

#[test]
fn r_type_uses_only_low_bits_of_field() {
    let f = fields(encode(Op::Add, 0, 0, 5).unwrap());
    assert_eq!(f.field, 5);
    assert_eq!(f.dest(), 5);
}

#[test]
fn jalr_and_o_type_ignore_third_field() {
    assert_eq!(encode(Op::Jalr, 1, 2, 1234).unwrap(), (5 << 22) | (1 << 19) | (2 << 16));
    assert_eq!(encode(Op::Noop, 0, 0, -9).unwrap(), 7 << 22);
}

#[test]
fn range_errors() {
    assert_eq!(encode(Op::Add, 8, 0, 0), Err(EncodeError::RegisterRange { value: 8 }));
    assert_eq!(encode(Op::Lw, 0, -1, 0), Err(EncodeError::RegisterRange { value: -1 }));
    assert_eq!(encode(Op::Nor, 0, 0, 9), Err(EncodeError::RegisterRange { value: 9 }));
    assert_eq!(
        encode(Op::Beq, 0, 0, -32769),
        Err(EncodeError::OffsetRange { value: -32769 })
    );
}

#[test]
fn every_opcode_value_decodes() {
    let dec = Lc2kDecoder::new();
    for op in Op::ALL {
        let d = dec.decode((op.opcode() << 22) as i32).unwrap();
        assert_eq!(d.op, op);
    }
    assert_eq!(Op::from_opcode(8), None);
    assert_eq!(Op::from_opcode(-1), None);
}
