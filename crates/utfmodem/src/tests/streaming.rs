use alloc::{string::String, vec, vec::Vec};

use crate::{
    CodecError, DecodeOptions, Utf8StreamDecoder, chunk_utils::produce_chunks, decode_utf8,
    encode_utf8,
};

const SAMPLE: &str = "chunked 𝕸odem text 👋 with ✓ marks";

fn feed_all(decoder: &mut Utf8StreamDecoder, chunks: &[&[u8]]) -> String {
    let mut out = String::new();
    for chunk in chunks {
        out.push_str(&decoder.feed(chunk).unwrap());
    }
    out.push_str(&decoder.close().unwrap());
    out
}

/// The four bytes of U+1F44B split two-and-two: nothing is emitted for the
/// incomplete prefix, and the scalar appears once it completes.
#[test]
fn split_scalar_across_chunks() {
    let mut decoder = Utf8StreamDecoder::new(DecodeOptions::default());
    assert_eq!(decoder.feed(&[0xF0, 0x9F]).unwrap(), "");
    assert_eq!(decoder.feed(&[0x91, 0x8B]).unwrap(), "👋");
    assert_eq!(decoder.close().unwrap(), "");
}

#[test]
fn every_partition_matches_one_shot() {
    let payload = encode_utf8(SAMPLE);
    for parts in 1..=payload.len() {
        let chunks = produce_chunks(&payload, parts);
        let mut decoder = Utf8StreamDecoder::new(DecodeOptions::default());
        assert_eq!(feed_all(&mut decoder, &chunks), SAMPLE, "parts = {parts}");
    }
}

#[test]
fn ascii_is_emitted_immediately() {
    let mut decoder = Utf8StreamDecoder::new(DecodeOptions::default());
    assert_eq!(decoder.feed(b"ab").unwrap(), "ab");
    assert_eq!(decoder.feed(b"").unwrap(), "");
    assert_eq!(decoder.feed(b"c").unwrap(), "c");
}

/// A carry can grow across several one-byte chunks; it never exceeds the
/// five bytes of the longest possible partial lead sequence.
#[test]
fn carry_accretes_across_chunks() {
    let mut decoder = Utf8StreamDecoder::new(DecodeOptions::default());
    assert_eq!(decoder.feed(&[0xFC]).unwrap(), "");
    for _ in 0..4 {
        assert_eq!(decoder.feed(&[0x80]).unwrap(), "");
    }
    // Carry holds five bytes now; close turns each into a replacement.
    assert_eq!(decoder.close().unwrap(), "\u{FFFD}".repeat(5));
}

#[test]
fn close_flushes_incomplete_tail_per_byte() {
    let mut decoder = Utf8StreamDecoder::new(DecodeOptions::default());
    assert_eq!(decoder.feed(&[0x41, 0xE2, 0x82]).unwrap(), "A");
    assert_eq!(decoder.close().unwrap(), "\u{FFFD}\u{FFFD}");
}

#[test]
fn strict_close_rejects_incomplete_tail() {
    let mut decoder = Utf8StreamDecoder::new(DecodeOptions::strict());
    assert_eq!(decoder.feed(&[0x41, 0xE2, 0x82]).unwrap(), "A");
    assert_eq!(
        decoder.close(),
        Err(CodecError::TruncatedInput { position: 1 })
    );
}

#[test]
fn strict_error_names_global_stream_position() {
    let mut decoder = Utf8StreamDecoder::new(DecodeOptions::strict());
    assert_eq!(decoder.feed(b"abc").unwrap(), "abc");
    assert_eq!(decoder.feed(&[0x64, 0x80]).unwrap_err(),
        CodecError::InvalidEncoding { position: 4 }
    );
    // The session is dead after a strict failure.
    assert_eq!(decoder.feed(b"x"), Err(CodecError::AlreadyBound));
    assert_eq!(decoder.close(), Err(CodecError::AlreadyBound));
}

#[test]
fn malformed_split_sequence_is_replaced_not_lost() {
    // 0xE2 0x82 carried over, then a non-continuation byte arrives: the
    // carried sequence fails, the new byte decodes on its own.
    let mut decoder = Utf8StreamDecoder::new(DecodeOptions::default());
    assert_eq!(decoder.feed(&[0xE2, 0x82]).unwrap(), "");
    assert_eq!(decoder.feed(&[0x41]).unwrap(), "\u{FFFD}A");
    assert_eq!(decoder.close().unwrap(), "");
}

#[test]
fn close_twice_is_a_session_error() {
    let mut decoder = Utf8StreamDecoder::new(DecodeOptions::default());
    assert_eq!(decoder.close().unwrap(), "");
    assert_eq!(decoder.close(), Err(CodecError::AlreadyBound));
    assert_eq!(decoder.feed(b"late"), Err(CodecError::AlreadyBound));
}

#[test]
fn bind_consumes_a_fresh_decoder_only() {
    let mut used = Utf8StreamDecoder::new(DecodeOptions::default());
    let _ = used.feed(b"a").unwrap();
    assert!(matches!(
        used.bind(vec![]),
        Err(CodecError::AlreadyBound)
    ));

    let fresh = Utf8StreamDecoder::new(DecodeOptions::default());
    assert!(fresh.bind(vec![]).is_ok());
}

#[test]
fn bound_stream_yields_text_chunks_then_ends() {
    let payload = encode_utf8(SAMPLE);
    let chunks: Vec<Result<Vec<u8>, CodecError>> = produce_chunks(&payload, 7)
        .into_iter()
        .map(|c| Ok(c.to_vec()))
        .collect();

    let decoder = Utf8StreamDecoder::new(DecodeOptions::default());
    let stream = decoder.bind(chunks).unwrap();
    let mut text = String::new();
    for piece in stream {
        let piece = piece.unwrap();
        assert!(!piece.is_empty());
        text.push_str(&piece);
    }
    assert_eq!(text, SAMPLE);
}

#[test]
fn bound_stream_forwards_upstream_error_verbatim() {
    let upstream_err = CodecError::OutOfRange {
        position: 9,
        window: 3,
    };
    let chunks = vec![
        Ok(b"ok".to_vec()),
        Err(upstream_err),
        Ok(b"never read".to_vec()),
    ];

    let decoder = Utf8StreamDecoder::new(DecodeOptions::default());
    let mut stream = decoder.bind(chunks).unwrap();
    assert_eq!(stream.next(), Some(Ok(String::from("ok"))));
    assert_eq!(stream.next(), Some(Err(upstream_err)));
    // Fused after the error.
    assert_eq!(stream.next(), None);
}

#[test]
fn bound_stream_flushes_carry_on_close() {
    let chunks = vec![Ok(vec![0xF0, 0x9F])];
    let decoder = Utf8StreamDecoder::new(DecodeOptions::default());
    let pieces: Vec<_> = decoder.bind(chunks).unwrap().map(Result::unwrap).collect();
    assert_eq!(pieces, vec![String::from("\u{FFFD}\u{FFFD}")]);
}

#[test]
fn streaming_matches_one_shot_on_malformed_input() {
    // Malformed in the middle, split awkwardly.
    let payload = [0x68u8, 0xE2, 0x28, 0xA1, 0xF0, 0x9F, 0x91, 0x8B, 0x69];
    let expected = decode_utf8(&payload, DecodeOptions::default()).unwrap();
    for parts in 1..=payload.len() {
        let chunks = produce_chunks(&payload, parts);
        let mut decoder = Utf8StreamDecoder::new(DecodeOptions::default());
        assert_eq!(feed_all(&mut decoder, &chunks), expected, "parts = {parts}");
    }
}
