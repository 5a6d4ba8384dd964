//! Structural checks over a sequence of unified messages.

use crate::{Message, Role};
use parley_error::{HistoryError, HistoryErrorKind, HistoryResult};
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

/// Two neighbouring messages land on the same side of the conversation.
///
/// Some vendors reject such histories and others accept them, so this is
/// reported rather than raised.
#[derive(Debug, Clone, PartialEq, Eq, derive_new::new, derive_more::Display)]
#[display(
    "Messages {} and {} both come from the {} side (roles {} and {})",
    previous_index,
    index,
    side,
    previous_role,
    role
)]
pub struct RoleAlternationWarning {
    /// Position of the earlier message
    pub previous_index: usize,
    /// Position of the later message
    pub index: usize,
    /// Role of the earlier message
    pub previous_role: Role,
    /// Role of the later message
    pub role: Role,
    /// `user` or `model`
    pub side: &'static str,
}

/// Checks that every tool result answers an earlier, still pending request.
///
/// Requests and results are matched in history order. A request may be
/// answered later in the same message or in any following message; each
/// request is answered at most once. Separate messages may reuse a call id,
/// in which case each reuse awaits its own result.
///
/// # Errors
///
/// Returns [`HistoryErrorKind::ToolResultMismatch`] for a result with no
/// pending request and [`HistoryErrorKind::DuplicateToolCallId`] when one
/// message issues two requests with the same id.
///
/// # Examples
///
/// ```
/// use parley_core::{Message, ToolCallResult, validate_tool_call_result_matches_request};
///
/// let orphan = Message::tool().with_tool_result(ToolCallResult::success("abc", "add", "3"));
/// assert!(validate_tool_call_result_matches_request(&[orphan]).is_err());
/// ```
pub fn validate_tool_call_result_matches_request(messages: &[Message]) -> HistoryResult<()> {
    let mut pending: HashMap<&str, usize> = HashMap::new();
    for message in messages {
        let mut issued: HashSet<&str> = HashSet::new();
        for item in message.content() {
            if let Some(call) = item.as_tool_call() {
                if !issued.insert(call.id.as_str()) {
                    return Err(HistoryError::new(HistoryErrorKind::DuplicateToolCallId {
                        message_id: message.id().clone(),
                        call_id: call.id.clone(),
                    }));
                }
                *pending.entry(call.id.as_str()).or_default() += 1;
            } else if let Some(result) = item.as_tool_result() {
                match pending.get_mut(result.id.as_str()) {
                    Some(count) if *count > 1 => *count -= 1,
                    Some(_) => {
                        pending.remove(result.id.as_str());
                    }
                    None => {
                        return Err(HistoryError::new(HistoryErrorKind::ToolResultMismatch(
                            result.id.clone(),
                        )));
                    }
                }
            }
        }
    }
    if !pending.is_empty() {
        debug!(
            count = pending.values().sum::<usize>(),
            "Tool calls still awaiting results"
        );
    }
    Ok(())
}

/// Side of the conversation a role speaks for, `None` for system prompts.
fn side(role: Role) -> Option<&'static str> {
    match role {
        Role::System => None,
        Role::User | Role::Tool => Some("user"),
        Role::Assistant => Some("model"),
    }
}

/// Lists places where consecutive non-system messages share a side.
///
/// User and tool messages count as the user side. System messages are
/// ignored.
pub fn validate_role_alternation(messages: &[Message]) -> Vec<RoleAlternationWarning> {
    let mut warnings = Vec::new();
    let mut previous: Option<(usize, Role, &'static str)> = None;
    for (index, message) in messages.iter().enumerate() {
        let role = *message.role();
        let Some(current) = side(role) else {
            continue;
        };
        if let Some((previous_index, previous_role, previous_side)) = previous
            && previous_side == current
        {
            warnings.push(RoleAlternationWarning::new(
                previous_index,
                index,
                previous_role,
                role,
                current,
            ));
        }
        previous = Some((index, role, current));
    }
    warnings
}

/// Checks that only assistant messages carry generation metadata.
pub fn validate_metadata_roles(messages: &[Message]) -> HistoryResult<()> {
    match messages
        .iter()
        .find(|m| m.metadata().is_some() && *m.role() != Role::Assistant)
    {
        Some(message) => Err(HistoryError::new(
            HistoryErrorKind::MetadataOnNonAssistant(message.id().clone()),
        )),
        None => Ok(()),
    }
}

/// Runs every structural check and returns the advisory warnings.
#[instrument(skip_all, fields(message_count = messages.len()))]
pub fn validate_history(messages: &[Message]) -> HistoryResult<Vec<RoleAlternationWarning>> {
    validate_metadata_roles(messages)?;
    validate_tool_call_result_matches_request(messages)?;
    Ok(validate_role_alternation(messages))
}
