use crate::api::lists::error::ListsError;
use crate::database::DocStore;
use chrono::Utc;
use common_types::{Vote, VoteChoice, VoteMap, WritePolicy};
use std::collections::BTreeMap;
use tracing::{instrument, warn};

/// Creates a named voting list. The trimmed name is the primary key.
/// Creating a list that already exists is a no-op success; its votes are
/// left untouched.
#[instrument(skip(store))]
pub async fn create_list(store: &DocStore, name: &str) -> Result<(), ListsError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ListsError::EmptyName);
    }
    store
        .update(|doc| {
            doc.lists.entry(name.to_string()).or_default();
        })
        .await?;
    Ok(())
}

/// Every list with its raw vote map. Pure read.
#[instrument(skip(store))]
pub async fn get_lists(store: &DocStore) -> Result<BTreeMap<String, VoteMap>, ListsError> {
    Ok(store.load().await?.lists)
}

/// Records one voter's decision on one item within one list.
///
/// A later vote for the same (list, item) pair overwrites the earlier one.
/// The item id is not validated here; dangling references are filtered on
/// the read side. A vote for an unknown list is dropped under the lenient
/// policy and a not-found error under the strict one.
#[instrument(skip(store, comment))]
pub async fn record_vote(
    store: &DocStore,
    policy: WritePolicy,
    list_name: &str,
    item_id: &str,
    choice: VoteChoice,
    comment: &str,
) -> Result<(), ListsError> {
    let recorded = store
        .update(|doc| {
            let Some(votes) = doc.lists.get_mut(list_name) else {
                return false;
            };
            votes.insert(
                item_id.to_string(),
                Vote {
                    choice,
                    comment: comment.to_string(),
                    voted_at: Utc::now(),
                },
            );
            true
        })
        .await?;

    if recorded {
        return Ok(());
    }
    match policy {
        WritePolicy::Lenient => {
            warn!("Dropping vote for unknown list: {list_name}");
            Ok(())
        }
        WritePolicy::Strict => Err(ListsError::NotFound(list_name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_eyre::eyre::Result;

    #[tokio::test]
    async fn whitespace_only_name_is_rejected() {
        let store = DocStore::in_memory();

        let result = create_list(&store, "  ").await;

        assert!(matches!(result, Err(ListsError::EmptyName)));
    }

    #[tokio::test]
    async fn creation_trims_and_is_idempotent() -> Result<()> {
        let store = DocStore::in_memory();

        create_list(&store, " trip ").await?;
        record_vote(
            &store,
            WritePolicy::Lenient,
            "trip",
            "p1.jpg",
            VoteChoice::Want,
            "",
        )
        .await?;
        create_list(&store, "trip").await?;

        let lists = get_lists(&store).await?;
        assert_eq!(lists.len(), 1);
        // Re-creation must not wipe recorded votes.
        assert_eq!(lists["trip"].len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn second_vote_for_the_same_pair_wins() -> Result<()> {
        let store = DocStore::in_memory();
        create_list(&store, "trip").await?;

        record_vote(
            &store,
            WritePolicy::Lenient,
            "trip",
            "p1.jpg",
            VoteChoice::Want,
            "yes!",
        )
        .await?;
        record_vote(
            &store,
            WritePolicy::Lenient,
            "trip",
            "p1.jpg",
            VoteChoice::Pass,
            "changed my mind",
        )
        .await?;

        let lists = get_lists(&store).await?;
        assert_eq!(lists["trip"].len(), 1);
        let vote = &lists["trip"]["p1.jpg"];
        assert_eq!(vote.choice, VoteChoice::Pass);
        assert_eq!(vote.comment, "changed my mind");
        Ok(())
    }

    #[tokio::test]
    async fn vote_for_unknown_list_is_dropped_leniently() -> Result<()> {
        let store = DocStore::in_memory();

        record_vote(
            &store,
            WritePolicy::Lenient,
            "nope",
            "p1.jpg",
            VoteChoice::Want,
            "",
        )
        .await?;

        assert!(get_lists(&store).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn vote_for_unknown_list_fails_under_strict_policy() {
        let store = DocStore::in_memory();

        let result = record_vote(
            &store,
            WritePolicy::Strict,
            "nope",
            "p1.jpg",
            VoteChoice::Want,
            "",
        )
        .await;

        assert!(matches!(result, Err(ListsError::NotFound(_))));
    }
}
