use bmp_hide::capacity::{CapacityPlan, plan_capacity};
use bmp_hide::constants::MAGIC_SIGNATURE;
use bmp_hide::steganography::{pack_byte, pack_u32, unpack_byte, unpack_u32};
use rand::RngCore;

/// 任意字节都能从任意载体中原样恢复，与载体的高 7 位无关
#[test]
fn test_byte_roundtrip_ignores_carrier_high_bits() {
    let mut rng = rand::rng();
    for value in 0..=u8::MAX {
        let mut carrier = [0u8; 8];
        rng.fill_bytes(&mut carrier);
        let original = carrier;

        pack_byte(value, &mut carrier);

        assert_eq!(unpack_byte(&carrier), value);
        for (before, after) in original.iter().zip(carrier.iter()) {
            assert_eq!(before & 0xFE, after & 0xFE, "only the LSB may change");
        }
    }
}

/// 第 0 位写入第 0 个载体字节
#[test]
fn test_byte_bit_order_is_lsb_first() {
    let mut carrier = [0xFFu8; 8];
    pack_byte(0b0000_0110, &mut carrier);
    assert_eq!(carrier, [0xFE, 0xFF, 0xFF, 0xFE, 0xFE, 0xFE, 0xFE, 0xFE]);
}

#[test]
fn test_u32_bit_order_is_lsb_first() {
    let mut carrier = [0u8; 32];
    pack_u32(0x8000_0001, &mut carrier);

    assert_eq!(carrier[0], 1);
    assert_eq!(carrier[31], 1);
    assert!(carrier[1..31].iter().all(|&b| b == 0));
}

#[test]
fn test_u32_roundtrip() {
    let mut rng = rand::rng();
    for value in [0, 1, 4, 0xDEAD_BEEF, u32::MAX, rng.next_u32()] {
        let mut carrier = [0u8; 32];
        rng.fill_bytes(&mut carrier);
        pack_u32(value, &mut carrier);
        assert_eq!(unpack_u32(&carrier), value);
    }
}

/// 容量恰好相等时成功，少一个字节时失败
#[test]
fn test_capacity_boundary() {
    // required = 2 + 4 + 4 + 4 + 10 = 24
    assert!(plan_capacity(24 * 8, 2, 4, 10));
    assert!(plan_capacity(24 * 8 + 7, 2, 4, 10));
    assert!(!plan_capacity(24 * 8 - 1, 2, 4, 10));
    assert!(!plan_capacity(23 * 8, 2, 4, 10));
}

#[test]
fn test_capacity_tiny_image_is_rejected() {
    // 3x2 像素 → 18 个像素字节 → 可容纳 2 字节
    let plan = CapacityPlan::new(18, 4, 2, 1);
    assert_eq!(plan.required, 15);
    assert_eq!(plan.available, 2);
    assert!(!plan.is_sufficient());
    assert!(plan.ensure().is_err());
}

#[test]
fn test_capacity_large_image_is_accepted() {
    let plan = CapacityPlan::new(100 * 100 * 3, MAGIC_SIGNATURE.len() as u64, 4, 10);
    assert_eq!(plan.available, 3750);
    assert_eq!(plan.required, MAGIC_SIGNATURE.len() as u64 + 4 + 4 + 4 + 10);
    assert!(plan.ensure().is_ok());
}

#[test]
fn test_capacity_does_not_overflow() {
    assert!(!plan_capacity(u64::MAX, u64::MAX, u64::MAX, u64::MAX));
}
