use proptest::prelude::*;

use bitcore_primitives::util::{ByteReader, ByteWriter, VarInt};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn varint_write_read_roundtrip(val in any::<u64>()) {
        let mut writer = ByteWriter::new();
        writer.write_varint(VarInt(val));
        let data = writer.into_bytes();
        prop_assert_eq!(data.len(), VarInt(val).length());

        let mut reader = ByteReader::new(&data);
        prop_assert_eq!(reader.read_varint().unwrap(), VarInt(val));
        prop_assert!(reader.is_exhausted());
    }

    #[test]
    fn integer_write_read_roundtrip(a in any::<u8>(), b in any::<u16>(), c in any::<u32>(), d in any::<u64>()) {
        let mut writer = ByteWriter::new();
        writer.write_u8(a);
        writer.write_u16_le(b);
        writer.write_u32_le(c);
        writer.write_u64_le(d);

        let data = writer.into_bytes();
        let mut reader = ByteReader::new(&data);
        prop_assert_eq!(reader.read_u8().unwrap(), a);
        prop_assert_eq!(reader.read_u16_le().unwrap(), b);
        prop_assert_eq!(reader.read_u32_le().unwrap(), c);
        prop_assert_eq!(reader.read_u64_le().unwrap(), d);
        prop_assert!(reader.is_exhausted());
    }

    #[test]
    fn reversed_write_read_is_identity(data in prop::collection::vec(any::<u8>(), 0..128)) {
        let mut writer = ByteWriter::new();
        writer.write_bytes_reversed(&data);
        let encoded = writer.into_bytes();

        let mut reader = ByteReader::new(&encoded);
        let back = reader.read_bytes_reversed(data.len()).unwrap();
        prop_assert_eq!(back, data);
    }

    #[test]
    fn read_past_end_fails(data in prop::collection::vec(any::<u8>(), 0..32), extra in 1usize..16) {
        let mut reader = ByteReader::new(&data);
        prop_assert!(reader.read_bytes(data.len() + extra).is_err());
        // A failed read consumes nothing.
        prop_assert_eq!(reader.remaining(), data.len());
    }
}
