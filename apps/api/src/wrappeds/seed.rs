use tracing::info;

use crate::models::wrapped::SampleWrapped;
use crate::store::WrappedStore;

/// Demonstration entries inserted at startup. Their HTML ships under
/// `<PUBLIC_DIR>/wrappeds/`.
pub const SAMPLES: [SampleWrapped; 4] = [
    SampleWrapped {
        id: "alex-jordan",
        names: "Alex & Jordan",
        date_range: "Jun 2024 – Feb 2025",
        emoji: "🔥",
        gradient: "linear-gradient(135deg, #7c4dff, #1a1040)",
        static_path: "/wrappeds/alex-jordan.html",
    },
    SampleWrapped {
        id: "sam-riley",
        names: "Sam & Riley",
        date_range: "Mar 2025 – Feb 2026",
        emoji: "🌙",
        gradient: "linear-gradient(135deg, #00bfa5, #0d3b3b)",
        static_path: "/wrappeds/sam-riley.html",
    },
    SampleWrapped {
        id: "chris-morgan",
        names: "Chris & Morgan",
        date_range: "Jan 2025 – Feb 2026",
        emoji: "☀️",
        gradient: "linear-gradient(135deg, #ff9800, #e65100)",
        static_path: "/wrappeds/chris-morgan.html",
    },
    SampleWrapped {
        id: "taylor-casey",
        names: "Taylor & Casey",
        date_range: "Sep 2025 – Feb 2026",
        emoji: "🎵",
        gradient: "linear-gradient(135deg, #ff6b6b, #c0392b)",
        static_path: "/wrappeds/taylor-casey.html",
    },
];

/// Insert-or-ignore every sample. Returns how many rows were newly written.
pub async fn seed_samples(store: &dyn WrappedStore) -> Result<usize, sqlx::Error> {
    let mut inserted = 0;
    for sample in &SAMPLES {
        if store.upsert_seed(sample).await? {
            inserted += 1;
        }
    }
    info!("Seeded {} sample wrappeds ({inserted} new)", SAMPLES.len());
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory_store;

    #[tokio::test]
    async fn test_seed_twice_keeps_one_row_per_sample() {
        let store = memory_store().await;
        assert_eq!(seed_samples(store.as_ref()).await.unwrap(), SAMPLES.len());
        assert_eq!(seed_samples(store.as_ref()).await.unwrap(), 0);

        let rows = store.list_all().await.unwrap();
        assert_eq!(rows.len(), SAMPLES.len());
        for sample in &SAMPLES {
            assert_eq!(rows.iter().filter(|r| r.id == sample.id).count(), 1);
        }
        assert!(rows.iter().all(|r| r.is_sample && r.is_public));
    }

    #[tokio::test]
    async fn test_reseed_skips_deleted_sample() {
        let store = memory_store().await;
        seed_samples(store.as_ref()).await.unwrap();
        assert!(store.delete("sam-riley").await.unwrap());

        assert_eq!(seed_samples(store.as_ref()).await.unwrap(), 0);
        assert!(store.get_by_id("sam-riley").await.unwrap().is_none());
        assert_eq!(store.list_all().await.unwrap().len(), SAMPLES.len() - 1);
    }

    #[test]
    fn test_sample_ids_are_unique() {
        for (i, a) in SAMPLES.iter().enumerate() {
            for b in &SAMPLES[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }
}
