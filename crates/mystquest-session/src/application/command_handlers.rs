//! Command handlers for the Session & Progress context.
//!
//! Application-level functions orchestrating the session state machine:
//! load the record, apply the domain mutation, write it back under the
//! optimistic version guard, then publish notifications. Every write is a
//! single read-modify-write unit; on a version collision the handler
//! re-reads once, re-applies, and retries the conditional write. A second
//! collision propagates `ConcurrencyConflict` to the caller as retryable.

use mystquest_catalog::repository::CatalogRepository;
use mystquest_core::clock::Clock;
use mystquest_core::command::Command;
use mystquest_core::error::DomainError;
use mystquest_core::notifier::Notifier;
use mystquest_core::token::TokenIssuer;
use uuid::Uuid;

use crate::domain::commands::{
    AdvanceRound, AssignCharacter, CreateSession, InvitePlayer, JoinGame, SetSessionStatus,
};
use crate::domain::events::GameEvent;
use crate::domain::player::PlayerSession;
use crate::domain::session::{GameSession, GameSessionStatus};
use crate::repository::SessionRepository;

/// How many fresh tokens to try before giving up on an invitation.
const TOKEN_ISSUE_ATTEMPTS: usize = 3;

async fn load_session(
    sessions: &dyn SessionRepository,
    id: Uuid,
) -> Result<GameSession, DomainError> {
    sessions
        .session_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("game session", id))
}

/// Conditional write with a single re-read-and-reapply retry. If the record
/// vanished between read and retry this surfaces `NotFound` instead of
/// re-applying a stale write.
async fn write_session_with_retry<F>(
    sessions: &dyn SessionRepository,
    mut session: GameSession,
    reapply: F,
) -> Result<GameSession, DomainError>
where
    F: Fn(&mut GameSession) -> Result<(), DomainError> + Send + Sync,
{
    match sessions.update_session(&session).await {
        Ok(()) => {
            session.version += 1;
            Ok(session)
        }
        Err(err) if err.is_concurrency_conflict() => {
            let mut fresh = load_session(sessions, session.id).await?;
            reapply(&mut fresh)?;
            sessions.update_session(&fresh).await?;
            fresh.version += 1;
            Ok(fresh)
        }
        Err(err) => Err(err),
    }
}

/// Player-session counterpart of [`write_session_with_retry`].
async fn write_player_with_retry<F>(
    sessions: &dyn SessionRepository,
    mut player: PlayerSession,
    reapply: F,
) -> Result<PlayerSession, DomainError>
where
    F: Fn(&mut PlayerSession) -> Result<(), DomainError> + Send + Sync,
{
    match sessions.update_player(&player).await {
        Ok(()) => {
            player.version += 1;
            Ok(player)
        }
        Err(err) if err.is_concurrency_conflict() => {
            let mut fresh = sessions
                .player_by_id(player.id)
                .await?
                .ok_or_else(|| DomainError::not_found("player session", player.id))?;
            reapply(&mut fresh)?;
            sessions.update_player(&fresh).await?;
            fresh.version += 1;
            Ok(fresh)
        }
        Err(err) => Err(err),
    }
}

/// Handles [`CreateSession`]: positions a new session at the quest's first
/// round (smallest `number`). Nobody has joined yet, so nothing is
/// published.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the quest does not exist and
/// `DomainError::InvalidState` if it has no rounds.
pub async fn handle_create_session(
    command: &CreateSession,
    clock: &dyn Clock,
    catalog: &dyn CatalogRepository,
    sessions: &dyn SessionRepository,
) -> Result<GameSession, DomainError> {
    catalog
        .quest_by_id(command.quest_id)
        .await?
        .ok_or_else(|| DomainError::not_found("quest", command.quest_id))?;

    let rounds = catalog.rounds_by_quest(command.quest_id).await?;
    let Some(first_round) = rounds.first() else {
        return Err(DomainError::InvalidState(format!(
            "quest {} has no rounds",
            command.quest_id
        )));
    };

    let session = GameSession::create(command.quest_id, first_round, clock.now());
    sessions.insert_session(&session).await?;

    tracing::info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        session_id = %session.id,
        quest_id = %session.quest_id,
        "game session created"
    );
    Ok(session)
}

/// Handles [`SetSessionStatus`]: applies the transition table, stamps the
/// start/end milestones, and publishes `GameStatusChanged`.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for a missing session and
/// `DomainError::InvalidState` for a disallowed transition.
pub async fn handle_set_status(
    command: &SetSessionStatus,
    clock: &dyn Clock,
    sessions: &dyn SessionRepository,
    notifier: &dyn Notifier,
) -> Result<GameSession, DomainError> {
    let mut session = load_session(sessions, command.session_id).await?;
    let now = clock.now();
    let apply = |s: &mut GameSession| s.transition_to(command.status, now);

    apply(&mut session)?;
    let session = write_session_with_retry(sessions, session, apply).await?;

    tracing::info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        session_id = %session.id,
        status = session.status.as_str(),
        "game session status changed"
    );
    notifier
        .publish(
            GameEvent::GameStatusChanged {
                status: session.status,
            }
            .into_notification(session.id),
        )
        .await;
    Ok(session)
}

/// Handles [`AdvanceRound`]: moves the session to the round with the
/// smallest `number` greater than the current one, or completes the session
/// when no such round exists. Advancing resumes a paused session. Publishes
/// `RoundAdvanced` followed by one `ContentRevealed` per public item of the
/// new round (in display order), or `GameStatusChanged` on completion.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the session or its current round is
/// missing and `DomainError::InvalidState` if the session is already
/// completed.
pub async fn handle_advance_round(
    command: &AdvanceRound,
    clock: &dyn Clock,
    catalog: &dyn CatalogRepository,
    sessions: &dyn SessionRepository,
    notifier: &dyn Notifier,
) -> Result<GameSession, DomainError> {
    let mut retried = false;
    loop {
        let mut session = load_session(sessions, command.session_id).await?;
        if session.status == GameSessionStatus::Completed {
            return Err(DomainError::InvalidState(format!(
                "game session {} is already completed",
                session.id
            )));
        }

        let current = catalog
            .round_by_id(session.current_round_id)
            .await?
            .ok_or_else(|| DomainError::not_found("round", session.current_round_id))?;
        let rounds = catalog.rounds_by_quest(session.quest_id).await?;
        let next = rounds
            .into_iter()
            .filter(|r| r.number > current.number)
            .min_by_key(|r| r.number);

        let now = clock.now();
        let events = match &next {
            None => {
                session.complete(now);
                vec![GameEvent::GameStatusChanged {
                    status: GameSessionStatus::Completed,
                }]
            }
            Some(round) => {
                session.advance_to(round, now);
                let mut events = vec![GameEvent::RoundAdvanced {
                    round_number: round.number,
                    round_title: round.title.clone(),
                }];
                let content = catalog.content_by_quest(session.quest_id).await?;
                events.extend(
                    content
                        .into_iter()
                        .filter(|c| c.round_id == Some(round.id) && c.is_public)
                        .map(|c| GameEvent::ContentRevealed {
                            content_title: c.title,
                        }),
                );
                events
            }
        };

        match sessions.update_session(&session).await {
            Ok(()) => {
                session.version += 1;
                tracing::info!(
                    command_type = command.command_type(),
                    correlation_id = %command.correlation_id(),
                    session_id = %session.id,
                    current_round = session.current_round,
                    status = session.status.as_str(),
                    "round advanced"
                );
                for event in events {
                    notifier.publish(event.into_notification(session.id)).await;
                }
                return Ok(session);
            }
            Err(err) if err.is_concurrency_conflict() && !retried => {
                retried = true;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Handles [`InvitePlayer`]: creates an unbound player session with a fresh
/// globally unique invitation token (checked-insert-or-retry). Token
/// delivery to the player is an external collaborator's responsibility, so
/// nothing is published here.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for a missing session,
/// `DomainError::Validation` for a blank email, and `DomainError::Conflict`
/// if the email is already invited to this session.
pub async fn handle_invite_player(
    command: &InvitePlayer,
    clock: &dyn Clock,
    tokens: &dyn TokenIssuer,
    sessions: &dyn SessionRepository,
) -> Result<PlayerSession, DomainError> {
    if command.email.trim().is_empty() {
        return Err(DomainError::Validation("player email is required".into()));
    }
    load_session(sessions, command.session_id).await?;

    if sessions
        .player_by_session_and_email(command.session_id, &command.email)
        .await?
        .is_some()
    {
        return Err(DomainError::Conflict(format!(
            "player {} already invited to game session {}",
            command.email, command.session_id
        )));
    }

    let now = clock.now();
    let mut last_conflict = None;
    for _ in 0..TOKEN_ISSUE_ATTEMPTS {
        let token = tokens.issue();
        if sessions.player_by_token(&token).await?.is_some() {
            continue;
        }
        let player =
            PlayerSession::invite(command.session_id, command.email.clone(), token, now);
        match sessions.insert_player(&player).await {
            Ok(()) => {
                tracing::info!(
                    command_type = command.command_type(),
                    correlation_id = %command.correlation_id(),
                    session_id = %command.session_id,
                    player_session_id = %player.id,
                    "player invited"
                );
                return Ok(player);
            }
            Err(err @ DomainError::Conflict(_)) => {
                // A conflict here is either a raced duplicate invite or a
                // token collision; only the latter earns a fresh candidate.
                if sessions
                    .player_by_session_and_email(command.session_id, &command.email)
                    .await?
                    .is_some()
                {
                    return Err(DomainError::Conflict(format!(
                        "player {} already invited to game session {}",
                        command.email, command.session_id
                    )));
                }
                last_conflict = Some(err);
            }
            Err(err) => return Err(err),
        }
    }
    Err(last_conflict.unwrap_or_else(|| {
        DomainError::Infrastructure("could not issue a unique invitation token".into())
    }))
}

/// Handles [`JoinGame`]: claims an invitation token, setting the display
/// name and marking the player connected. Rejoining with a different name
/// renames the player. Publishes `PlayerConnectionChanged`.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no player session holds the token.
pub async fn handle_join_game(
    command: &JoinGame,
    clock: &dyn Clock,
    sessions: &dyn SessionRepository,
    notifier: &dyn Notifier,
) -> Result<PlayerSession, DomainError> {
    let mut player = sessions
        .player_by_token(&command.token)
        .await?
        .ok_or_else(|| DomainError::token_not_found(&command.token))?;

    let now = clock.now();
    let apply = |p: &mut PlayerSession| {
        p.join(&command.player_name, now);
        Ok(())
    };

    apply(&mut player)?;
    let player = write_player_with_retry(sessions, player, apply).await?;

    tracing::info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        session_id = %player.game_session_id,
        player_session_id = %player.id,
        "player joined"
    );
    notifier
        .publish(
            GameEvent::PlayerConnectionChanged {
                player_name: player.player_name.clone(),
                is_connected: true,
            }
            .into_notification(player.game_session_id),
        )
        .await;
    Ok(player)
}

/// Handles [`AssignCharacter`]: binds a quest character to a player session.
/// Two players may legitimately share one character; reassignment
/// overwrites the previous binding.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for a missing session/player/character
/// and `DomainError::Validation` when the player belongs to another session
/// or the character to another quest.
pub async fn handle_assign_character(
    command: &AssignCharacter,
    catalog: &dyn CatalogRepository,
    sessions: &dyn SessionRepository,
) -> Result<PlayerSession, DomainError> {
    let session = load_session(sessions, command.session_id).await?;
    let mut player = sessions
        .player_by_id(command.player_session_id)
        .await?
        .ok_or_else(|| DomainError::not_found("player session", command.player_session_id))?;
    if player.game_session_id != session.id {
        return Err(DomainError::Validation(format!(
            "player session {} does not belong to game session {}",
            player.id, session.id
        )));
    }

    let character = catalog
        .character_by_id(command.character_id)
        .await?
        .ok_or_else(|| DomainError::not_found("character", command.character_id))?;
    if character.quest_id != session.quest_id {
        return Err(DomainError::Validation(format!(
            "character {} belongs to a different quest than game session {}",
            character.id, session.id
        )));
    }

    let apply = |p: &mut PlayerSession| {
        p.character_id = Some(command.character_id);
        Ok(())
    };
    apply(&mut player)?;
    let player = write_player_with_retry(sessions, player, apply).await?;

    tracing::info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        session_id = %session.id,
        player_session_id = %player.id,
        character_id = %command.character_id,
        "character assigned"
    );
    Ok(player)
}

