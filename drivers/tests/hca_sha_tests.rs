// Licensed under the Apache-2.0 license

mod harness;

use harness::{message, reference_digest, ALL_MODES};
use rvcl_drivers::{
    Endianness, Hca, HcaSha, RvclError, ShaCtx, ShaMode, SHA_MAX_DIGEST_BYTE_SIZE,
};
use rvcl_emu_periph::HcaPeriph;

#[repr(C, align(8))]
struct AlignedBuf([u8; SHA_MAX_DIGEST_BYTE_SIZE + 8]);

fn soft_digest(mode: ShaMode, chunks: &[&[u8]]) -> Vec<u8> {
    let mut ctx = ShaCtx::init(mode, Endianness::Little).unwrap();
    for chunk in chunks {
        ctx.update(chunk).unwrap();
    }
    let mut out = [0u8; SHA_MAX_DIGEST_BYTE_SIZE];
    let len = ctx.finish(&mut out).unwrap();
    out[..len].to_vec()
}

fn hca_digest(sha: &HcaSha<&HcaPeriph>, mode: ShaMode, chunks: &[&[u8]]) -> Vec<u8> {
    let mut ctx = sha.init(mode, Endianness::Little).unwrap();
    for chunk in chunks {
        sha.update(&mut ctx, chunk).unwrap();
    }
    let mut out = [0u8; SHA_MAX_DIGEST_BYTE_SIZE];
    let len = sha.finish(ctx, &mut out).unwrap();
    out[..len].to_vec()
}

#[test]
fn test_known_answer_abc() {
    let periph = HcaPeriph::new();
    let hca = Hca::new(&periph);
    let sha = HcaSha::new(&hca);

    let mut out = [0u8; SHA_MAX_DIGEST_BYTE_SIZE];
    assert_eq!(sha.digest(ShaMode::Sha256, b"abc", &mut out), Ok(32));
    assert_eq!(
        &out[..32],
        hex::decode("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
            .unwrap()
            .as_slice()
    );

    assert_eq!(sha.digest(ShaMode::Sha224, b"", &mut out), Ok(28));
    assert_eq!(
        &out[..28],
        hex::decode("d14a028c2a3a2bc9476102bb288234c415a2b01f828ea62ac5b3e42f")
            .unwrap()
            .as_slice()
    );
}

#[test]
fn test_soft_and_hca_agree() {
    let periph = HcaPeriph::new();
    let hca = Hca::new(&periph);
    let sha = HcaSha::new(&hca);

    for mode in ALL_MODES {
        for len in [0, 1, 3, 64, 127, 128, 200, 1000] {
            let data = message(len);
            let soft = soft_digest(mode, &[data.as_slice()]);
            let hw = hca_digest(&sha, mode, &[data.as_slice()]);
            assert_eq!(soft, hw, "{mode:?} len {len}");
            assert_eq!(hw, reference_digest(mode, &data), "{mode:?} len {len}");
        }
    }
}

#[test]
fn test_padding_boundary() {
    let periph = HcaPeriph::new();
    let hca = Hca::new(&periph);
    let sha = HcaSha::new(&hca);

    for mode in ALL_MODES {
        let fits = mode.block_size() - mode.len_field_size() - 1;
        for (len, blocks) in [(fits, 1), (fits + 1, 2)] {
            let data = message(len);
            let before = periph.sha_blocks();
            let hw = hca_digest(&sha, mode, &[data.as_slice()]);
            assert_eq!(periph.sha_blocks() - before, blocks, "{mode:?} len {len}");
            assert_eq!(hw, reference_digest(mode, &data), "{mode:?} len {len}");
            assert_eq!(soft_digest(mode, &[data.as_slice()]), hw, "{mode:?} len {len}");
        }
    }
}

#[test]
fn test_streaming_equivalence() {
    let periph = HcaPeriph::new();
    let hca = Hca::new(&periph);
    let sha = HcaSha::new(&hca);

    let empty: &[u8] = &[];
    for mode in ALL_MODES {
        let bs = mode.block_size();
        let data = message(3 * bs + 5);
        let expected = reference_digest(mode, &data);
        for split in [bs - 1, bs, bs + 1] {
            let (a, b) = data.split_at(split);
            assert_eq!(soft_digest(mode, &[a, b]), expected, "{mode:?} split {split}");
            assert_eq!(hca_digest(&sha, mode, &[a, b]), expected, "{mode:?} split {split}");
            assert_eq!(
                soft_digest(mode, &[empty, a, empty, b, empty]),
                expected,
                "{mode:?} split {split}"
            );
        }

        // Byte at a time
        let bytes: Vec<&[u8]> = data.chunks(1).collect();
        assert_eq!(hca_digest(&sha, mode, &bytes), expected, "{mode:?}");
    }
}

#[test]
fn test_read_digest_alignment_equivalence() {
    let periph = HcaPeriph::new();
    let hca = Hca::new(&periph);
    let sha = HcaSha::new(&hca);

    let region: Vec<u8> = (0..64u8).map(|i| i.wrapping_mul(7).wrapping_add(1)).collect();
    periph.set_hash_region(&region);

    for mode in ALL_MODES {
        let len = mode.digest_size();
        let mut aligned = AlignedBuf([0; SHA_MAX_DIGEST_BYTE_SIZE + 8]);
        let mut misaligned = AlignedBuf([0; SHA_MAX_DIGEST_BYTE_SIZE + 8]);

        sha.read_digest(mode, &mut aligned.0[..len]).unwrap();
        sha.read_digest(mode, &mut misaligned.0[1..len + 1]).unwrap();

        assert_eq!(&aligned.0[..len], &misaligned.0[1..len + 1], "{mode:?}");
        for i in 0..len {
            assert_eq!(aligned.0[i], region[len - 1 - i], "{mode:?} byte {i}");
        }
        assert_eq!(misaligned.0[0], 0);
        assert_eq!(misaligned.0[len + 1], 0);
    }
}

#[test]
fn test_read_digest_output_too_small() {
    let periph = HcaPeriph::new();
    let hca = Hca::new(&periph);
    let sha = HcaSha::new(&hca);

    let mut out = [0u8; 47];
    assert_eq!(
        sha.read_digest(ShaMode::Sha384, &mut out),
        Err(RvclError::INVALID_OUTPUT)
    );
}

#[test]
fn test_finish_output_too_small() {
    let periph = HcaPeriph::new();
    let hca = Hca::new(&periph);
    let sha = HcaSha::new(&hca);

    let mut ctx = sha.init(ShaMode::Sha512, Endianness::Little).unwrap();
    sha.update(&mut ctx, b"abc").unwrap();
    let before = periph.sha_blocks();
    let mut out = [0u8; 63];
    assert_eq!(sha.finish(ctx, &mut out), Err(RvclError::INVALID_OUTPUT));
    assert_eq!(periph.sha_blocks(), before);
}

#[test]
fn test_big_endian_input() {
    let periph = HcaPeriph::new();
    let hca = Hca::new(&periph);
    let sha = HcaSha::new(&hca);

    let data = message(152);
    for mode in ALL_MODES {
        let mut swapped = data.clone();
        for chunk in swapped.chunks_exact_mut(mode.word_size()) {
            chunk.reverse();
        }

        let mut ctx = sha.init(mode, Endianness::Big).unwrap();
        sha.update(&mut ctx, &swapped).unwrap();
        let mut out = [0u8; SHA_MAX_DIGEST_BYTE_SIZE];
        let len = sha.finish(ctx, &mut out).unwrap();

        let mut soft = ShaCtx::init(mode, Endianness::Big).unwrap();
        soft.update(&swapped).unwrap();
        let mut soft_out = [0u8; SHA_MAX_DIGEST_BYTE_SIZE];
        soft.finish(&mut soft_out).unwrap();

        assert_eq!(out, soft_out, "{mode:?}");
        assert_eq!(&out[..len], reference_digest(mode, &data).as_slice());
    }
}

#[test]
fn test_sha_absent() {
    let periph = HcaPeriph::new();
    periph.set_sha_present(false);
    let hca = Hca::new(&periph);
    let sha = HcaSha::new(&hca);

    assert_eq!(
        sha.init(ShaMode::Sha256, Endianness::Little).err(),
        Some(RvclError::ERROR)
    );
    let mut out = [0u8; 64];
    assert_eq!(
        sha.digest(ShaMode::Sha512, b"abc", &mut out),
        Err(RvclError::ERROR)
    );
}

#[test]
fn test_block_failure_propagates() {
    let periph = HcaPeriph::new();
    let hca = Hca::new(&periph);
    let sha = HcaSha::new(&hca);

    let mut ctx = sha.init(ShaMode::Sha256, Endianness::Little).unwrap();
    sha.update(&mut ctx, &message(10)).unwrap();

    periph.set_sha_present(false);
    let tail: Vec<u8> = (0..60u8).collect();
    assert_eq!(sha.update(&mut ctx, &tail), Err(RvclError::ERROR));

    // The rejected block was never counted, so the update can be repeated
    periph.set_sha_present(true);
    sha.update(&mut ctx, &tail).unwrap();
    let mut out = [0u8; 32];
    assert_eq!(sha.finish(ctx, &mut out), Ok(32));
    let mut data = message(10);
    data.extend_from_slice(&tail);
    assert_eq!(&out[..], reference_digest(ShaMode::Sha256, &data).as_slice());

    let mut ctx = sha.init(ShaMode::Sha256, Endianness::Little).unwrap();
    sha.update(&mut ctx, b"abc").unwrap();
    periph.set_sha_present(false);
    let mut out = [0u8; 32];
    assert_eq!(sha.finish(ctx, &mut out), Err(RvclError::ERROR));
}

#[test]
fn test_busy_wait() {
    let periph = HcaPeriph::new();
    periph.set_sha_busy_polls(50);
    let hca = Hca::new(&periph);
    let sha = HcaSha::new(&hca);

    let mut out = [0u8; SHA_MAX_DIGEST_BYTE_SIZE];
    let len = sha.digest(ShaMode::Sha384, &message(300), &mut out).unwrap();
    assert_eq!(&out[..len], reference_digest(ShaMode::Sha384, &message(300)).as_slice());
}
