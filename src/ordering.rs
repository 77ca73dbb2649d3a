/**
 * Ordering Engine
 * Maintains the dense integer ordering over sections via whole-batch
 * reorder; listings tie-break on id for determinism.
 */
use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::ApiError;

/// Reassign `sort_order = index + 1` for each id, in sequence order.
///
/// The whole batch runs in one write transaction so concurrent single-row
/// writes never observe a half-applied ordering. Ids missing from the input
/// keep their existing sort_order; ids that match no row are no-ops.
pub async fn reorder(pool: &SqlitePool, ids: &[i64]) -> Result<(), ApiError> {
    let mut tx = pool.begin().await?;
    let now = Utc::now();

    for (index, id) in ids.iter().enumerate() {
        sqlx::query("UPDATE sections SET sort_order = ?, updated_at = ? WHERE id = ?")
            .bind(index as i64 + 1)
            .bind(now)
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    tracing::debug!("reordered {} sections", ids.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{NewSection, SectionPatch};
    use crate::db::test_pool;
    use crate::sections;

    async fn seed_three(pool: &SqlitePool) -> (i64, i64, i64) {
        let mut ids = Vec::new();
        for (name, kind) in [("a", "hero"), ("b", "about"), ("c", "projects")] {
            let s = sections::create(
                pool,
                NewSection {
                    name: name.to_string(),
                    kind: kind.to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
            ids.push(s.id);
        }
        (ids[0], ids[1], ids[2])
    }

    #[tokio::test]
    async fn test_full_permutation_yields_dense_order() {
        let pool = test_pool().await;
        let (a, b, c) = seed_three(&pool).await;

        reorder(&pool, &[c, a, b]).await.unwrap();

        let all = sections::list_all(&pool).await.unwrap();
        assert_eq!(all.iter().map(|s| s.id).collect::<Vec<_>>(), vec![c, a, b]);
        assert_eq!(
            all.iter().map(|s| s.sort_order).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[tokio::test]
    async fn test_reorder_untouched_ids_keep_their_order_value() {
        let pool = test_pool().await;
        let (a, b, c) = seed_three(&pool).await;

        // Only two of three ids submitted; c keeps sort_order 3.
        reorder(&pool, &[b, a]).await.unwrap();

        let all = sections::list_all(&pool).await.unwrap();
        let find = |id| all.iter().find(|s| s.id == id).unwrap().sort_order;
        assert_eq!(find(b), 1);
        assert_eq!(find(a), 2);
        assert_eq!(find(c), 3);
    }

    #[tokio::test]
    async fn test_reorder_unknown_id_is_noop() {
        let pool = test_pool().await;
        let (a, b, c) = seed_three(&pool).await;

        reorder(&pool, &[c, 999, a, b]).await.unwrap();

        let all = sections::list_all(&pool).await.unwrap();
        assert_eq!(all.iter().map(|s| s.id).collect::<Vec<_>>(), vec![c, a, b]);
        assert_eq!(
            all.iter().map(|s| s.sort_order).collect::<Vec<_>>(),
            vec![1, 3, 4]
        );
    }

    #[tokio::test]
    async fn test_duplicate_sort_order_tie_breaks_on_id() {
        let pool = test_pool().await;
        let (a, b, _c) = seed_three(&pool).await;

        sqlx::query("UPDATE sections SET sort_order = 1")
            .execute(&pool)
            .await
            .unwrap();

        let all = sections::list_all(&pool).await.unwrap();
        assert_eq!(all[0].id, a);
        assert_eq!(all[1].id, b);
    }

    #[tokio::test]
    async fn test_reorder_then_hide_scenario() {
        let pool = test_pool().await;
        let (a, b, c) = seed_three(&pool).await;

        reorder(&pool, &[c, a, b]).await.unwrap();
        sections::update(
            &pool,
            b,
            SectionPatch {
                is_visible: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let public = sections::list_public(&pool).await.unwrap();
        assert_eq!(public.iter().map(|s| s.id).collect::<Vec<_>>(), vec![c, a]);
    }
}
