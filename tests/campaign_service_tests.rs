//! Campaign service behaviour against both shipped stores

use chrono::Utc;
use merkledrop::campaign::{CreateCampaignRequest, FundingUpdate};
use merkledrop::proofs::{LeafRecord, NumericField};
use merkledrop::{
    verify_proof, Address, Amount, CampaignService, CampaignStore, Distribution, FileStore, Hash,
    MemoryStore, MerkleDropError,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::sync::Arc;
use tempfile::TempDir;

enum Backend {
    Memory,
    File,
}

/// A store plus whatever keeps it alive for the test's duration
struct Harness {
    service: CampaignService<Arc<dyn CampaignStore>>,
    _temp_dir: Option<TempDir>,
}

fn harness(backend: Backend) -> Harness {
    let (store, temp_dir): (Arc<dyn CampaignStore>, Option<TempDir>) = match backend {
        Backend::Memory => (Arc::new(MemoryStore::new()), None),
        Backend::File => {
            let temp_dir = TempDir::new().unwrap();
            let store = FileStore::open(temp_dir.path().join("campaigns")).unwrap();
            (Arc::new(store), Some(temp_dir))
        },
    };
    Harness {
        service: CampaignService::new(store),
        _temp_dir: temp_dir,
    }
}

fn records(count: u64) -> Vec<LeafRecord> {
    (0..count)
        .map(|i| LeafRecord {
            index: NumericField::from(i),
            account: format!("0x{:040x}", 0x1000 + i),
            amount: NumericField::Text(format!("{}", (i + 1) * 1_000)),
        })
        .collect()
}

fn request(campaign_id: u64, leaves: Vec<LeafRecord>) -> CreateCampaignRequest {
    let root = Distribution::from_records(&leaves, None).unwrap().root();
    CreateCampaignRequest {
        campaign_id,
        merkle_root: root,
        reward_token: Address::from_bytes([0x22; 20]),
        leaves,
        expiry: None,
    }
}

#[rstest]
#[case::memory(Backend::Memory)]
#[case::file(Backend::File)]
fn test_every_stored_proof_verifies(#[case] backend: Backend) {
    let h = harness(backend);
    let response = h.service.create_campaign(request(10, records(25))).unwrap();

    assert_eq!(response.entries_count, 25);
    assert_eq!(response.total_amount, Amount::from((1..=25u64).sum::<u64>() * 1_000));

    let campaign = h.service.campaign(10).unwrap();
    for entry in h.service.entries(10).unwrap() {
        assert!(verify_proof(&campaign.merkle_root, &entry.leaf(), &entry.merkle_proof));
        assert!(h.service.verify_entry(10, &entry.kol_address).unwrap());
    }
}

#[rstest]
#[case::memory(Backend::Memory)]
#[case::file(Backend::File)]
fn test_lookup_is_case_insensitive(#[case] backend: Backend) {
    let h = harness(backend);
    let mut leaves = records(3);
    leaves[1].account = "0xABCDEFabcdefABCDEFabcdefABCDEFabcdefABCD".to_string();
    h.service.create_campaign(request(11, leaves)).unwrap();

    let lower = Address::from_hex("0xabcdefabcdefabcdefabcdefabcdefabcdefabcd").unwrap();
    let proof = h.service.proof_for_account(11, &lower).unwrap();
    assert_eq!(proof.index, 1);
    assert_eq!(proof.address.to_hex(), "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd");
}

#[rstest]
#[case::memory(Backend::Memory)]
#[case::file(Backend::File)]
fn test_claim_lifecycle(#[case] backend: Backend) {
    let h = harness(backend);
    h.service.create_campaign(request(12, records(4))).unwrap();

    h.service
        .update_funding(
            12,
            FundingUpdate {
                total_funded: Some(Amount::from(10_000u64)),
                is_funded: Some(true),
            },
        )
        .unwrap();

    let tx = Hash::from_bytes([0x99; 32]);
    h.service.mark_claimed(12, 2, tx).unwrap();
    h.service.mark_claimed(12, 0, tx).unwrap();

    let campaign = h.service.campaign(12).unwrap();
    assert!(campaign.is_funded);
    assert_eq!(campaign.total_funded, Amount::from(10_000u64));
    assert_eq!(campaign.total_claimed, Amount::from(4_000u64));

    let claimed: Vec<u64> = h
        .service
        .entries(12)
        .unwrap()
        .into_iter()
        .filter(|entry| entry.claimed)
        .map(|entry| entry.index_in_merkle)
        .collect();
    assert_eq!(claimed, vec![0, 2]);

    assert!(matches!(
        h.service.mark_claimed(12, 2, tx),
        Err(MerkleDropError::AlreadyClaimed { .. })
    ));
}

#[rstest]
#[case::memory(Backend::Memory)]
#[case::file(Backend::File)]
fn test_rejections_leave_store_untouched(#[case] backend: Backend) {
    let h = harness(backend);

    let mut wrong_root = request(13, records(5));
    wrong_root.merkle_root = Hash::from_bytes([0x01; 32]);
    assert!(matches!(
        h.service.create_campaign(wrong_root),
        Err(MerkleDropError::RootMismatch { .. })
    ));

    let mut duplicate = records(3);
    duplicate[2].index = NumericField::from(0u64);
    let mut duplicate_request = request(13, records(3));
    duplicate_request.leaves = duplicate;
    assert!(matches!(
        h.service.create_campaign(duplicate_request),
        Err(MerkleDropError::InvalidInput { .. })
    ));

    let mut bad_address = request(13, records(2));
    bad_address.leaves[0].account = "0x1234".to_string();
    assert!(matches!(
        h.service.create_campaign(bad_address),
        Err(MerkleDropError::InvalidInput { .. })
    ));

    assert!(matches!(
        h.service.campaign(13),
        Err(MerkleDropError::CampaignNotFound { campaign_id: 13 })
    ));
    assert!(h.service.store().get_entries(13).unwrap().is_empty());
    assert!(matches!(
        h.service.proof_for_account(13, &Address::from_bytes([0x01; 20])),
        Err(MerkleDropError::RewardEntryNotFound { .. })
    ));
}

#[test]
fn test_file_store_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let tx = Hash::from_bytes([0x55; 32]);

    {
        let service = CampaignService::new(FileStore::open(temp_dir.path()).unwrap());
        service.create_campaign(request(20, records(6))).unwrap();
        service.mark_claimed(20, 5, tx).unwrap();
    }

    let service = CampaignService::new(FileStore::open(temp_dir.path()).unwrap());
    assert_eq!(service.store().list_campaigns().unwrap(), vec![20]);
    assert!(service.is_claim_open(20, Utc::now()).unwrap());

    let account = Address::from_hex(&format!("0x{:040x}", 0x1005)).unwrap();
    let proof = service.proof_for_account(20, &account).unwrap();
    assert!(proof.claimed);
    assert_eq!(proof.claimed_tx_hash, Some(tx));
    assert!(service.verify_entry(20, &account).unwrap());
}
