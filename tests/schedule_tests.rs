// tests/schedule_tests.rs
//! Generalized vs conformant key schedule, against fixed vectors

mod common;

use aes::cipher::{BlockEncrypt, KeyInit};
use aes::{Aes256, Block as AesBlock};
use common::{unhex, vectors};
use ridicrypt_rs::crypto::rijndael::Rijndael;
use ridicrypt_rs::{Conformant, Generalized, KeySchedule};

fn encrypt_one(schedule: &dyn KeySchedule, key: &[u8], plaintext: &[u8]) -> [u8; 16] {
    let cipher = Rijndael::new(schedule, key).unwrap();
    let mut block: [u8; 16] = plaintext.try_into().unwrap();
    cipher.encrypt_block(&mut block);
    block
}

#[test]
fn both_schedules_match_fips197() {
    for v in vectors().fips197 {
        let key = unhex(&v.key_hex);
        let expected = unhex(&v.ciphertext_hex);
        for schedule in [&Conformant as &dyn KeySchedule, &Generalized] {
            let got = encrypt_one(schedule, &key, &unhex(&v.plaintext_hex));
            assert_eq!(got.as_slice(), expected, "{} / {}", v.name, schedule.name());
        }
    }
}

#[test]
fn generalized_known_answers() {
    for v in vectors().schedule_vectors {
        let key = unhex(&v.key_hex);
        let plaintext = unhex(&v.plaintext_hex);
        let ciphertext = unhex(&v.ciphertext_hex);

        let cipher = Rijndael::new(&Generalized, &key).unwrap();
        assert_eq!(cipher.rounds(), key.len() / 4 + 6, "{}", v.name);

        let mut block: [u8; 16] = plaintext.clone().try_into().unwrap();
        cipher.encrypt_block(&mut block);
        assert_eq!(block.as_slice(), ciphertext, "{} encrypt", v.name);

        cipher.decrypt_block(&mut block);
        assert_eq!(block.as_slice(), plaintext, "{} decrypt", v.name);
    }
}

#[test]
fn roundtrip_at_vendor_and_standard_lengths() {
    let plaintext: Vec<u8> = (0u8..64).map(|b| b.wrapping_mul(37)).collect();
    for len in [16usize, 32, 36, 48] {
        let key: Vec<u8> = (0..len as u8).map(|b| b ^ 0xA5).collect();
        let cipher = Rijndael::new(&Generalized, &key).unwrap();

        let mut data = plaintext.clone();
        cipher.encrypt_ecb(&mut data).unwrap();
        assert_ne!(data, plaintext, "key length {len}");
        cipher.decrypt_ecb(&mut data).unwrap();
        assert_eq!(data, plaintext, "key length {len}");
    }
}

#[test]
fn conformant_aes_cannot_stand_in_for_48_byte_key() {
    let v = vectors();
    let gen48 = v
        .schedule_vectors
        .iter()
        .find(|v| v.name == "generalized_48")
        .unwrap();
    let key = unhex(&gen48.key_hex);
    let plaintext = unhex(&gen48.plaintext_hex);

    // The conformant schedule refuses the key outright.
    assert!(Conformant.expand(&key).is_err());
    assert!(Conformant.expand(&key[..36]).is_err());

    // A 14-round AES-256 over the first 32 bytes gives a different block.
    let aes = Aes256::new_from_slice(&key[..32]).unwrap();
    let mut block = AesBlock::clone_from_slice(&plaintext);
    aes.encrypt_block(&mut block);
    assert_eq!(block.as_slice(), unhex(&v.aes256_truncated_48_ciphertext_hex));

    let generalized = encrypt_one(&Generalized, &key, &plaintext);
    assert_eq!(generalized.as_slice(), unhex(&gen48.ciphertext_hex));
    assert_ne!(generalized.as_slice(), block.as_slice());
}

#[test]
fn conformant_rijndael_agrees_with_aes_crate() {
    let key = [0x3Cu8; 32];
    let plaintext = *b"block of sixteen";

    let aes = Aes256::new_from_slice(&key).unwrap();
    let mut expected = AesBlock::from(plaintext);
    aes.encrypt_block(&mut expected);

    assert_eq!(
        encrypt_one(&Conformant, &key, &plaintext).as_slice(),
        expected.as_slice()
    );
}
