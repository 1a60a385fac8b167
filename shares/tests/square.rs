use commonware_shares::{
    merge, merge_extended, parse_shares, placement, share_range_for_namespace, split_txs, Blob,
    Config, Error, Namespace, Share, Square, NAMESPACE_SIZE, PAY_FOR_BLOB_NAMESPACE, SHARE_SIZE,
    TX_NAMESPACE,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::num::NonZeroUsize;

fn random_blobs(rng: &mut StdRng, count: usize) -> Vec<Blob> {
    (0..count)
        .map(|_| {
            let namespace = Namespace::new_v0(&[7, rng.gen_range(0..8)]).unwrap();
            let mut data = vec![0u8; rng.gen_range(1..4_000)];
            rng.fill(&mut data[..]);
            Blob::new(namespace, data, 0).unwrap()
        })
        .collect()
}

fn random_txs(rng: &mut StdRng, count: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|_| {
            let mut tx = vec![0u8; rng.gen_range(0..1_500)];
            rng.fill(&mut tx[..]);
            tx
        })
        .collect()
}

#[test]
fn test_build_merge_round_trip() {
    let mut rng = StdRng::seed_from_u64(0);
    for threshold in [1, 16, 64] {
        let config = Config {
            subtree_root_threshold: NonZeroUsize::new(threshold).unwrap(),
            ..Default::default()
        };
        for _ in 0..10 {
            let txs = random_txs(&mut rng, 20);
            let pfb_txs = random_txs(&mut rng, 5);
            let blobs = random_blobs(&mut rng, 15);
            let square =
                Square::build_smallest(&txs, &pfb_txs, blobs.clone(), 128, &config).unwrap();

            let data = merge(square.shares(), &config).unwrap();
            assert_eq!(data.txs, txs);
            assert_eq!(data.pfb_txs, pfb_txs);
            assert_eq!(data.square_size, square.size());

            let mut sorted = blobs;
            sorted.sort_by_key(Blob::namespace);
            assert_eq!(data.blobs, sorted);

            // Every sequence in the square is well formed.
            let sequences = parse_shares(square.shares(), true).unwrap();
            assert_eq!(sequences.len(), 2 + data.blobs.len());
        }
    }
}

#[test]
fn test_blobs_start_at_placement_indexes() {
    let config = Config::default();
    let mut rng = StdRng::seed_from_u64(1);
    let txs = random_txs(&mut rng, 10);
    let mut blobs = random_blobs(&mut rng, 20);
    let square = Square::build(&txs, &[], blobs.clone(), 32, &config).unwrap();

    blobs.sort_by_key(Blob::namespace);
    let lens: Vec<usize> = blobs.iter().map(Blob::shares_needed).collect();
    let split = split_txs(&txs, &[], &config).unwrap();
    let start = placement::next_share_index(
        split.tx_shares.len(),
        lens[0],
        32,
        config.subtree_root_threshold,
    );
    let (_, indexes) = placement::blob_shares_used_non_interactive_defaults(
        start,
        32,
        config.subtree_root_threshold,
        &lens,
    );
    for (blob, index) in blobs.iter().zip(indexes) {
        let share = &square.shares()[index];
        assert!(share.is_sequence_start());
        assert_eq!(share.namespace(), blob.namespace());
        assert_eq!(share.sequence_len() as usize, blob.data().len());
    }
}

#[test]
fn test_transaction_ranges() {
    let txs = vec![vec![1u8; 2_000], vec![2u8; 10]];
    let pfb_txs = vec![vec![3u8; 700]];
    let split = split_txs(&txs, &pfb_txs, &Config::default()).unwrap();
    let square = Square::build(&txs, &pfb_txs, Vec::new(), 4, &Config::default()).unwrap();

    let tx_range = share_range_for_namespace(square.shares(), TX_NAMESPACE).unwrap();
    let pfb_range = share_range_for_namespace(square.shares(), PAY_FOR_BLOB_NAMESPACE).unwrap();
    assert_eq!(tx_range, 0..split.tx_shares.len());
    for range in &split.tx_ranges {
        assert!(range.start >= tx_range.start && range.end <= tx_range.end);
    }
    for range in &split.pfb_ranges {
        assert!(range.start >= pfb_range.start && range.end <= pfb_range.end);
    }
}

#[test]
fn test_merge_extended_square() {
    let config = Config::default();
    let mut rng = StdRng::seed_from_u64(2);
    let txs = random_txs(&mut rng, 5);
    let blobs = random_blobs(&mut rng, 3);
    let square = Square::build_smallest(&txs, &[], blobs, 64, &config).unwrap();
    let width = square.size();

    // Lay out the original shares in the top-left quadrant and random parity elsewhere.
    let mut extended = Vec::with_capacity(4 * width * width);
    for row in 0..2 * width {
        for col in 0..2 * width {
            if row < width && col < width {
                extended.push(square.shares()[row * width + col].as_ref().to_vec());
            } else {
                let mut parity = vec![0u8; SHARE_SIZE];
                rng.fill(&mut parity[..]);
                extended.push(parity);
            }
        }
    }
    let data = merge_extended(&extended, &config).unwrap();
    assert_eq!(data, merge(square.shares(), &config).unwrap());
}

#[test]
fn test_merge_rejects_corrupted_square() {
    let config = Config::default();
    let namespace = Namespace::new_v0(&[7, 7]).unwrap();
    let blob = Blob::new(namespace, vec![1u8; 2_000], 0).unwrap();
    let square = Square::build(&[], &[], vec![blob], 4, &config).unwrap();

    // Drop a continuation share of the blob in favor of a copy of its first share.
    let mut shares = square.into_shares();
    shares[2] = shares[0].clone();
    assert!(matches!(
        merge(&shares, &config),
        Err(Error::TruncatedSequence { .. })
    ));

    // Mislabel a continuation share as a different namespace.
    let mut raw = shares[1].as_ref().to_vec();
    raw[..NAMESPACE_SIZE].copy_from_slice(&Namespace::new_v0(&[7, 8]).unwrap().to_bytes());
    let mut shares = Square::build(
        &[],
        &[],
        vec![Blob::new(namespace, vec![1u8; 2_000], 0).unwrap()],
        4,
        &config,
    )
    .unwrap()
    .into_shares();
    shares[1] = Share::new(raw).unwrap();
    assert!(matches!(
        merge(&shares, &config),
        Err(Error::NamespaceMismatch { .. })
    ));
}
