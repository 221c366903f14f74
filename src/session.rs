//! One client's side of the board synchronization protocol.
//!
//! A [`Session`] owns the local copy of the board, the viewing side and the
//! player's current selection. User actions and incoming messages are
//! handled one at a time; each returns the messages to send to the peers.
//!
//! Local moves are applied before they are sent. Nothing is rolled back if
//! delivery fails; a later `arrived`/`sync` exchange restores agreement.

use log::{debug, info, trace, warn};

use crate::apply::{Move, apply_move};
use crate::board::{Board, Grid, Point, square_at};
use crate::legality::{selectable_move_points, selectable_put_points, validate_move};
use crate::perspective::{reverse_if_opposite, reverse_point_if_opposite};
use crate::piece::{PieceType, Side};
use crate::promotion::{Choice, PendingMove, PromotionResolver, Resolution};
use crate::protocol::{Message, ProtocolError, decode};

/// Per-client settings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// The side the board is initially viewed from.
    pub side: Side,
    /// Allow moving and dropping either side's pieces.
    pub elevated: bool,
    /// Check received moves against the rules before applying them.
    pub validate_remote: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            side: Side::First,
            elevated: false,
            validate_remote: true,
        }
    }
}

/// What the player has picked, in view coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    /// A piece on the board.
    Square(Point),
    /// A piece type in `side`'s hand.
    Hand { side: Side, kind: PieceType },
}

/// One client: its copy of the board plus the local interaction state.
pub struct Session {
    /// Local copy of the shared board, in absolute coordinates.
    board: Board,
    config: SessionConfig,
    /// The side the board is currently viewed from.
    current_side: Side,
    selection: Selection,
    promotion: PromotionResolver,
    /// Destination of the last applied move, absolute.
    last_move: Option<Point>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    /// A session on the starting board, viewed from `config.side`.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            board: Board::starting(),
            config,
            current_side: config.side,
            selection: Selection::None,
            promotion: PromotionResolver::Idle,
            last_move: None,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The board in absolute coordinates.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn current_side(&self) -> Side {
        self.current_side
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// The grid as the current side sees it.
    pub fn view(&self) -> Grid {
        reverse_if_opposite(&self.board.squares, self.current_side)
    }

    /// The destination of the last applied move, in absolute coordinates.
    pub fn last_move_point(&self) -> Option<Point> {
        self.last_move
    }

    /// Whether a promotion prompt is open.
    pub fn is_awaiting_promotion(&self) -> bool {
        self.promotion.is_awaiting()
    }

    /// The move held by an open promotion prompt, in view coordinates.
    pub fn pending_promotion(&self) -> Option<&PendingMove> {
        self.promotion.pending()
    }

    /// Highlighted targets for the current selection, in view coordinates.
    pub fn selectable_points(&self) -> Vec<Point> {
        let view = self.view();
        match self.selection {
            Selection::None => Vec::new(),
            Selection::Square(p) => selectable_move_points(p, &view, self.current_side),
            Selection::Hand { side, kind } => selectable_put_points(kind, &view, side),
        }
    }

    // =========================================================================
    // Connection events
    // =========================================================================

    /// The message to send once the connection is open.
    pub fn on_open(&self) -> Message {
        info!("connection open, announcing arrival");
        Message::Arrived
    }

    /// Decode and handle one payload received from a peer.
    pub fn receive(&mut self, payload: &str) -> Result<Vec<Message>, ProtocolError> {
        let message = decode(payload).inspect_err(|e| warn!("dropping payload: {e}"))?;
        Ok(self.handle(message))
    }

    /// Handle one message received from a peer. Returns the replies.
    pub fn handle(&mut self, message: Message) -> Vec<Message> {
        debug!("received {}", message.action());
        match message {
            Message::Move { mv } => {
                if self.config.validate_remote {
                    if let Err(e) = validate_move(&self.board, &mv) {
                        warn!("rejecting remote move {mv:?}: {e}; requesting resync");
                        return vec![Message::Arrived];
                    }
                }
                self.commit(&mv);
                self.clear_pending();
                Vec::new()
            }
            Message::Reset => {
                self.restart();
                Vec::new()
            }
            Message::Sync { board } => {
                self.board = *board;
                self.clear_pending();
                Vec::new()
            }
            Message::Arrived => vec![Message::sync(&self.board)],
        }
    }

    // =========================================================================
    // User actions
    // =========================================================================

    /// Click a board square given in view coordinates.
    pub fn click_square(&mut self, p: Point) -> Vec<Message> {
        if self.promotion.is_awaiting() {
            return Vec::new();
        }
        let view = self.view();
        let occupant = square_at(&view, p);
        let can_pick = occupant.is_some_and(|sq| self.config.elevated || sq.side == self.current_side);

        match self.selection {
            Selection::Square(selected) => {
                if selected == p {
                    self.selection = Selection::None;
                } else if self.selectable_points().contains(&p) {
                    return self.move_piece(selected, p);
                } else if can_pick {
                    self.selection = Selection::Square(p);
                } else {
                    self.selection = Selection::None;
                }
                Vec::new()
            }
            Selection::Hand { side, kind } => {
                if self.selectable_points().contains(&p) {
                    self.selection = Selection::None;
                    return self.put_piece(side, kind, p);
                }
                if can_pick {
                    self.selection = Selection::Square(p);
                }
                Vec::new()
            }
            Selection::None => {
                if can_pick {
                    self.selection = Selection::Square(p);
                }
                Vec::new()
            }
        }
    }

    /// Click a piece in a hand. Returns whether it became selected.
    pub fn click_hand(&mut self, side: Side, kind: PieceType) -> bool {
        if self.promotion.is_awaiting() {
            return false;
        }
        if side != self.current_side && !self.config.elevated {
            self.selection = Selection::None;
            return false;
        }
        if !self.board.hands.contains(side, kind) {
            return false;
        }
        self.selection = Selection::Hand { side, kind };
        true
    }

    /// Answer a pending promotion prompt.
    pub fn choose_promotion(&mut self, choice: Choice) -> Vec<Message> {
        let finalized = self.promotion.choose(choice);
        self.selection = Selection::None;
        match finalized {
            Some(pending) => self.finish_move(pending),
            None => Vec::new(),
        }
    }

    /// Reset the board locally and tell the peers.
    pub fn reset(&mut self) -> Vec<Message> {
        self.restart();
        vec![Message::Reset]
    }

    /// Switch the viewing side. Clears any selection.
    pub fn toggle_side(&mut self) -> Side {
        self.current_side = self.current_side.opposite();
        self.clear_pending();
        self.current_side
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn move_piece(&mut self, from: Point, to: Point) -> Vec<Message> {
        let origin = square_at(&self.view(), from)
            .filter(|sq| self.config.elevated || sq.side == self.current_side);
        let Some(origin) = origin else {
            self.selection = Selection::None;
            return Vec::new();
        };
        let pending = PendingMove {
            owner: origin.side,
            from,
            to,
            piece: origin.piece,
        };
        match self.promotion.submit(pending, self.current_side) {
            Resolution::Ready(pending) => {
                self.selection = Selection::None;
                self.finish_move(pending)
            }
            Resolution::AwaitingChoice => Vec::new(),
        }
    }

    fn finish_move(&mut self, pending: PendingMove) -> Vec<Message> {
        let mv = Move::relocate(
            pending.owner,
            reverse_point_if_opposite(pending.from, self.current_side),
            reverse_point_if_opposite(pending.to, self.current_side),
            pending.piece,
        );
        self.commit(&mv);
        vec![Message::Move { mv }]
    }

    fn put_piece(&mut self, side: Side, kind: PieceType, to: Point) -> Vec<Message> {
        if !self.board.hands.contains(side, kind) {
            return Vec::new();
        }
        let mv = Move::drop(side, reverse_point_if_opposite(to, self.current_side), kind);
        self.commit(&mv);
        vec![Message::Move { mv }]
    }

    fn commit(&mut self, mv: &Move) {
        let next = apply_move(&self.board, mv);
        if next == self.board {
            trace!("{mv:?} left the board unchanged");
            return;
        }
        self.board = next;
        self.last_move = Some(mv.to);
        trace!("board after {mv:?}:\n{}", self.board);
    }

    /// Drop the selection and any open promotion prompt. Both refer to
    /// squares of a board that has just been replaced.
    fn clear_pending(&mut self) {
        self.selection = Selection::None;
        self.promotion = PromotionResolver::Idle;
    }

    fn restart(&mut self) {
        self.board = Board::starting();
        self.last_move = None;
        self.clear_pending();
    }
}
