//! Participant roster and turn rotation.
//!
//! Turn order is a fixed list locked in at game start; eliminated entries
//! keep their slot (they still matter for display and the session summary)
//! and the cursor advances circularly past them.

use serde::Serialize;

pub type UserId = i64;

/// One player in a party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participant {
    pub user_id: UserId,
    pub display_name: String,
    /// Position in the fixed turn order (join order at start).
    pub turn_order: usize,
    pub is_eliminated: bool,
    /// 1-based order of elimination, for reporting.
    pub elimination_order: Option<u32>,
    pub words_played: u32,
    pub invalid_attempts: u32,
}

impl Participant {
    fn new(user_id: UserId, display_name: String, turn_order: usize) -> Self {
        Self {
            user_id,
            display_name,
            turn_order,
            is_eliminated: false,
            elimination_order: None,
            words_played: 0,
            invalid_attempts: 0,
        }
    }
}

/// Fixed-order participant list plus the current-turn cursor.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    players: Vec<Participant>,
    /// Index into `players`; only meaningful once the game has started.
    current: usize,
    eliminations: u32,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn contains(&self, user_id: UserId) -> bool {
        self.players.iter().any(|p| p.user_id == user_id)
    }

    pub fn get(&self, user_id: UserId) -> Option<&Participant> {
        self.players.iter().find(|p| p.user_id == user_id)
    }

    pub fn participants(&self) -> &[Participant] {
        &self.players
    }

    /// Append a player at the end of the turn order.
    pub fn add(&mut self, user_id: UserId, display_name: impl Into<String>) -> &Participant {
        let turn_order = self.players.len();
        self.players
            .push(Participant::new(user_id, display_name.into(), turn_order));
        &self.players[turn_order]
    }

    /// Remove a player (lobby only) and close the gap in turn order.
    pub fn remove(&mut self, user_id: UserId) -> Option<Participant> {
        let idx = self.players.iter().position(|p| p.user_id == user_id)?;
        let removed = self.players.remove(idx);
        for (i, p) in self.players.iter_mut().enumerate() {
            p.turn_order = i;
        }
        Some(removed)
    }

    /// Mark a player eliminated, recording elimination order.
    pub fn eliminate(&mut self, user_id: UserId) -> Option<&Participant> {
        let idx = self.players.iter().position(|p| p.user_id == user_id)?;
        let player = &mut self.players[idx];
        if !player.is_eliminated {
            player.is_eliminated = true;
            self.eliminations += 1;
            player.elimination_order = Some(self.eliminations);
        }
        Some(&self.players[idx])
    }

    /// The participant whose turn it is, if anyone alive holds the cursor.
    pub fn current_player(&self) -> Option<&Participant> {
        self.players.get(self.current).filter(|p| !p.is_eliminated)
    }

    /// Move the cursor to the next non-eliminated participant (wrapping).
    ///
    /// Returns the new current player's id, or `None` when nobody is left
    /// alive. Also used right after an elimination to step off the dead slot.
    pub fn advance(&mut self) -> Option<UserId> {
        if self.active_count() == 0 {
            return None;
        }
        for _ in 0..self.players.len() {
            self.current = (self.current + 1) % self.players.len();
            if !self.players[self.current].is_eliminated {
                return Some(self.players[self.current].user_id);
            }
        }
        None
    }

    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| !p.is_eliminated).count()
    }

    /// Last player standing, once everyone else is out.
    pub fn winner(&self) -> Option<&Participant> {
        let mut alive = self.players.iter().filter(|p| !p.is_eliminated);
        let first = alive.next()?;
        if alive.next().is_some() {
            return None;
        }
        Some(first)
    }

    pub fn note_word_played(&mut self, user_id: UserId) {
        if let Some(p) = self.players.iter_mut().find(|p| p.user_id == user_id) {
            p.words_played += 1;
        }
    }

    pub fn note_invalid_attempt(&mut self, user_id: UserId) {
        if let Some(p) = self.players.iter_mut().find(|p| p.user_id == user_id) {
            p.invalid_attempts += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster_of(n: usize) -> Roster {
        let mut roster = Roster::new();
        for i in 0..n {
            roster.add(i as UserId, format!("player-{i}"));
        }
        roster
    }

    #[test]
    fn join_order_fixes_turn_order() {
        let roster = roster_of(3);
        let orders: Vec<usize> = roster.participants().iter().map(|p| p.turn_order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
        assert_eq!(roster.current_player().unwrap().user_id, 0);
    }

    #[test]
    fn leave_in_lobby_reassigns_slots_densely() {
        let mut roster = roster_of(3);
        roster.remove(1).unwrap();
        let orders: Vec<(UserId, usize)> = roster
            .participants()
            .iter()
            .map(|p| (p.user_id, p.turn_order))
            .collect();
        assert_eq!(orders, vec![(0, 0), (2, 1)]);
    }

    #[test]
    fn advance_wraps_and_skips_eliminated() {
        let mut roster = roster_of(4);
        roster.eliminate(1);
        assert_eq!(roster.advance(), Some(2));
        assert_eq!(roster.advance(), Some(3));
        assert_eq!(roster.advance(), Some(0));
        // Eliminated slot keeps its position but never gets the cursor.
        assert_eq!(roster.advance(), Some(2));
    }

    #[test]
    fn eliminated_current_player_is_no_longer_current() {
        let mut roster = roster_of(2);
        roster.eliminate(0);
        assert!(roster.current_player().is_none());
        assert_eq!(roster.advance(), Some(1));
        assert_eq!(roster.current_player().unwrap().user_id, 1);
    }

    #[test]
    fn elimination_order_counts_up() {
        let mut roster = roster_of(3);
        roster.eliminate(2);
        roster.eliminate(0);
        assert_eq!(roster.get(2).unwrap().elimination_order, Some(1));
        assert_eq!(roster.get(0).unwrap().elimination_order, Some(2));
        assert_eq!(roster.winner().unwrap().user_id, 1);
    }

    #[test]
    fn winner_requires_exactly_one_alive() {
        let mut roster = roster_of(3);
        assert!(roster.winner().is_none());
        roster.eliminate(0);
        assert!(roster.winner().is_none());
        roster.eliminate(1);
        assert_eq!(roster.winner().unwrap().user_id, 2);
        roster.eliminate(2);
        assert!(roster.winner().is_none());
    }
}
