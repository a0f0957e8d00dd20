//! Binary wire form of a social feature.
//!
//! A single protobuf message serves both kinds; the kind itself travels as
//! the `tx_extra` tag. Absent optional fields are not encoded at all.

/// Protobuf message carrying one pep or post.
#[derive(Clone, PartialEq, prost::Message)]
pub struct FeatureProto {
    #[prost(string, tag = "1")]
    pub msg: String,

    #[prost(string, optional, tag = "2")]
    pub pseudonym: Option<String>,

    /// 32 bytes.
    #[prost(bytes = "vec", optional, tag = "3")]
    pub public_key: Option<Vec<u8>>,

    /// 32 bytes.
    #[prost(bytes = "vec", optional, tag = "4")]
    pub tx_ref: Option<Vec<u8>>,

    #[prost(string, optional, tag = "5")]
    pub pepetag: Option<String>,

    #[prost(string, optional, tag = "6")]
    pub donation_address: Option<String>,

    /// 64 bytes.
    #[prost(bytes = "vec", optional, tag = "7")]
    pub signature: Option<Vec<u8>>,

    /// Posts only.
    #[prost(string, optional, tag = "8")]
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_absent_fields_are_not_encoded() {
        let bare = FeatureProto {
            msg: "hi".into(),
            ..Default::default()
        };
        // field 1, wire type 2, len 2, "hi"
        assert_eq!(bare.encode_to_vec(), vec![0x0a, 0x02, b'h', b'i']);
    }

    #[test]
    fn test_empty_and_absent_differ() {
        let empty = FeatureProto {
            msg: "hi".into(),
            pseudonym: Some(String::new()),
            ..Default::default()
        };
        let decoded = FeatureProto::decode(empty.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded.pseudonym, Some(String::new()));
        assert_eq!(decoded.pepetag, None);
    }

    #[test]
    fn test_garbage_fails_to_decode() {
        assert!(FeatureProto::decode(&[0x0a, 0x05, b'h'][..]).is_err());
    }
}
