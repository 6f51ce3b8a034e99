// * Snapshot Fingerprinting
// * A 64-bit xxh64 digest over every page and link of a crawl, used to skip
// * reanalysis when the same snapshot is handed to the engine again.

use crate::ingest::CrawlSnapshot;
use xxhash_rust::xxh64::Xxh64;

const FINGERPRINT_SEED: u64 = 0;

// * Field separator and record terminator; neither can appear inside valid UTF-8
const FIELD_SEP: u8 = 0xFE;
const RECORD_END: u8 = 0xFF;

/// Computes the fingerprint of a snapshot; order of pages and links matters
pub fn snapshot_fingerprint(snapshot: &CrawlSnapshot) -> u64 {
    let mut hasher = Xxh64::new(FINGERPRINT_SEED);

    hasher.update(b"pages");
    for page in &snapshot.pages {
        for field in [&page.url, &page.title, &page.content] {
            hasher.update(field.as_bytes());
            hasher.update(&[FIELD_SEP]);
        }
        hasher.update(&page.depth.to_le_bytes());
        hasher.update(&[RECORD_END]);
    }

    hasher.update(b"links");
    for link in &snapshot.links {
        for field in [&link.source_url, &link.target_url, &link.anchor_text] {
            hasher.update(field.as_bytes());
            hasher.update(&[FIELD_SEP]);
        }
        hasher.update(&[RECORD_END]);
    }

    hasher.digest()
}

// * Checks if content has changed by comparing fingerprints
pub fn has_content_changed(new_fingerprint: u64, cached_fingerprint: u64) -> bool {
    new_fingerprint != cached_fingerprint
}
