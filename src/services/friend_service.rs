//! Friend graph resolution over directed follow edges.
//!
//! An edge (A -> B) alone means A is "following" B; edges in both directions
//! make the pair "friends". There is no separate friendship table, the state
//! is derived from the two directed rows on every read.

use std::collections::HashSet;

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};

use crate::models::follow::{self as follow_model, Entity as Follow};
use crate::models::profile::{Entity as Profile, ProfileDto};

use super::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowStatus {
    None,
    Following,
    Friend,
}

async fn edge_exists(
    db: &DatabaseConnection,
    follower_id: i32,
    following_id: i32,
) -> Result<bool, sea_orm::DbErr> {
    let count = Follow::find()
        .filter(follow_model::Column::FollowerId.eq(follower_id))
        .filter(follow_model::Column::FollowingId.eq(following_id))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Resolve the relationship the viewer has with the target.
///
/// Fails open: a read error resolves to the non-friend side so the calling
/// screen renders a follow button instead of crashing.
pub async fn resolve_status(
    db: &DatabaseConnection,
    viewer_id: i32,
    target_id: i32,
) -> FollowStatus {
    if viewer_id == target_id {
        // Self-relationship is undefined
        return FollowStatus::None;
    }

    let forward = match edge_exists(db, viewer_id, target_id).await {
        Ok(exists) => exists,
        Err(e) => {
            tracing::warn!("follow status read failed ({} -> {}): {}", viewer_id, target_id, e);
            return FollowStatus::None;
        }
    };

    if !forward {
        return FollowStatus::None;
    }

    match edge_exists(db, target_id, viewer_id).await {
        Ok(true) => FollowStatus::Friend,
        Ok(false) => FollowStatus::Following,
        Err(e) => {
            tracing::warn!("reverse edge read failed ({} -> {}): {}", target_id, viewer_id, e);
            FollowStatus::Following
        }
    }
}

/// Follow or unfollow depending on the status the client last saw.
///
/// No locking: two rapid toggles race and the last write wins, which is
/// acceptable because the UI serializes gestures per user.
pub async fn toggle_follow(
    db: &DatabaseConnection,
    viewer_id: i32,
    target_id: i32,
    current: FollowStatus,
) -> Result<FollowStatus, ServiceError> {
    if viewer_id == target_id {
        return Err(ServiceError::Validation(
            "Cannot follow yourself".to_string(),
        ));
    }

    match current {
        FollowStatus::None => {
            let edge = follow_model::ActiveModel {
                follower_id: Set(viewer_id),
                following_id: Set(target_id),
                created_at: Set(chrono::Utc::now().to_rfc3339()),
                ..Default::default()
            };
            Follow::insert(edge)
                .on_conflict(
                    sea_orm::sea_query::OnConflict::columns([
                        follow_model::Column::FollowerId,
                        follow_model::Column::FollowingId,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec_without_returning(db)
                .await?;

            if edge_exists(db, target_id, viewer_id).await? {
                Ok(FollowStatus::Friend)
            } else {
                Ok(FollowStatus::Following)
            }
        }
        FollowStatus::Following | FollowStatus::Friend => {
            Follow::delete_many()
                .filter(follow_model::Column::FollowerId.eq(viewer_id))
                .filter(follow_model::Column::FollowingId.eq(target_id))
                .exec(db)
                .await?;
            Ok(FollowStatus::None)
        }
    }
}

/// Ids of everyone the user follows (outgoing edges).
pub async fn following_ids(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Vec<i32>, ServiceError> {
    let edges = Follow::find()
        .filter(follow_model::Column::FollowerId.eq(user_id))
        .all(db)
        .await?;
    Ok(edges.into_iter().map(|e| e.following_id).collect())
}

/// Ids of everyone following the user (incoming edges).
pub async fn follower_ids(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Vec<i32>, ServiceError> {
    let edges = Follow::find()
        .filter(follow_model::Column::FollowingId.eq(user_id))
        .all(db)
        .await?;
    Ok(edges.into_iter().map(|e| e.follower_id).collect())
}

/// Cardinality of the intersection of two outgoing-follow id sets.
/// Each party's own outgoing edges are used, never incoming ones.
pub fn mutual_count(mine: &[i32], theirs: &[i32]) -> u64 {
    let mine: HashSet<i32> = mine.iter().copied().collect();
    let theirs: HashSet<i32> = theirs.iter().copied().collect();
    mine.intersection(&theirs).count() as u64
}

pub async fn mutual_friends_count(
    db: &DatabaseConnection,
    viewer_id: i32,
    target_id: i32,
) -> Result<u64, ServiceError> {
    let mine = following_ids(db, viewer_id).await?;
    let theirs = following_ids(db, target_id).await?;
    Ok(mutual_count(&mine, &theirs))
}

/// Partition followers into mutual friends and pending requests.
/// A follower the user also follows back is a friend, anyone else is an
/// incoming request waiting for accept/decline.
pub fn split_followers(following: &[i32], followers: &[i32]) -> (Vec<i32>, Vec<i32>) {
    let following: HashSet<i32> = following.iter().copied().collect();
    let mut friends = Vec::new();
    let mut requests = Vec::new();
    for id in followers {
        if following.contains(id) {
            friends.push(*id);
        } else {
            requests.push(*id);
        }
    }
    (friends, requests)
}

#[derive(Debug, Serialize)]
pub struct FriendLists {
    pub friends: Vec<ProfileDto>,
    pub requests: Vec<ProfileDto>,
}

pub async fn friends_and_requests(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<FriendLists, ServiceError> {
    let following = following_ids(db, user_id).await?;
    let followers = follower_ids(db, user_id).await?;
    let (friend_ids, request_ids) = split_followers(&following, &followers);

    Ok(FriendLists {
        friends: load_profiles(db, &friend_ids).await?,
        requests: load_profiles(db, &request_ids).await?,
    })
}

async fn load_profiles(
    db: &DatabaseConnection,
    ids: &[i32],
) -> Result<Vec<ProfileDto>, ServiceError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let profiles = Profile::find()
        .filter(crate::models::profile::Column::Id.is_in(ids.to_vec()))
        .all(db)
        .await?;
    Ok(profiles.into_iter().map(ProfileDto::from).collect())
}

/// Accept an incoming request by following back; the requester's edge plus
/// this new one makes the pair mutual.
pub async fn accept_request(
    db: &DatabaseConnection,
    user_id: i32,
    requester_id: i32,
) -> Result<FollowStatus, ServiceError> {
    toggle_follow(db, user_id, requester_id, FollowStatus::None).await
}

/// Decline an incoming request by deleting the requester's edge.
pub async fn decline_request(
    db: &DatabaseConnection,
    user_id: i32,
    requester_id: i32,
) -> Result<(), ServiceError> {
    Follow::delete_many()
        .filter(follow_model::Column::FollowerId.eq(requester_id))
        .filter(follow_model::Column::FollowingId.eq(user_id))
        .exec(db)
        .await?;
    Ok(())
}

/// Remove a friend by deleting only the caller's own edge. The other
/// direction survives and shows up again as an incoming request.
pub async fn remove_friend(
    db: &DatabaseConnection,
    user_id: i32,
    friend_id: i32,
) -> Result<(), ServiceError> {
    Follow::delete_many()
        .filter(follow_model::Column::FollowerId.eq(user_id))
        .filter(follow_model::Column::FollowingId.eq(friend_id))
        .exec(db)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutual_count_uses_set_intersection() {
        // A follows {X, Y}, B follows {Y, Z}: the only mutual is Y
        assert_eq!(mutual_count(&[1, 2], &[2, 3]), 1);
        assert_eq!(mutual_count(&[2, 3], &[1, 2]), 1);
        assert_eq!(mutual_count(&[], &[1, 2]), 0);
        assert_eq!(mutual_count(&[1, 1, 2], &[2, 2]), 1);
    }

    #[test]
    fn split_followers_partitions_by_follow_back() {
        let (friends, requests) = split_followers(&[10, 20], &[20, 30]);
        assert_eq!(friends, vec![20]);
        assert_eq!(requests, vec![30]);
    }
}
