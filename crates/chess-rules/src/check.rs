//! Check analysis: every line or leap attack bearing on a king.

use chess_core::{Color, Offset, PieceKind, Square};
use tracing::trace;

use crate::catalog::{base_templates, templates, Template};
use crate::geometry::{leaper_points, linear_run_length, KNIGHT_RADIUS_SQ};
use crate::{Board, RulesError};

/// One attack on a king.
///
/// Without a `cover` the attack is live: the king is in check. With a cover,
/// exactly one friendly piece stands between king and attacker, and that
/// piece is pinned to the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckInfo {
    /// The attacker's template that reaches the king.
    pub template: Template,
    pub attacker: Square,
    pub cover: Option<Square>,
}

impl CheckInfo {
    /// Returns true if nothing shields the king from this attack.
    #[inline]
    pub fn is_live(&self) -> bool {
        self.cover.is_none()
    }

    /// Squares a friendly piece may occupy to neutralize this attack: the
    /// attacker's square, plus every square strictly between king and
    /// attacker for line attacks.
    pub fn resolving_squares(&self, king: Square) -> Vec<Square> {
        let mut squares = vec![self.attacker];
        if let Template::Linear(_) = self.template {
            if let Some((direction, distance)) = Offset::between(king, self.attacker) {
                squares.extend((1..distance).filter_map(|step| king.offset(direction, step as i16)));
            }
        }
        squares
    }
}

/// Finds every attack on the king of `color`.
///
/// Lines are traced from the king outward on a copy of the board with the
/// king's own pieces removed, so a line runs through friendly pieces and
/// stops at the first opposing one. If that piece has a template reaching
/// back to the king, the friendly pieces on the real board between them
/// decide the outcome: none is a check, one is a pin, and two or more
/// neutralize the line. Knight attacks cannot be blocked and are always
/// live.
///
/// The king's own templates are the queen's directions limited to one
/// step, so the queen's runs already cover adjacent attackers.
pub fn attacks_on_king(color: Color, board: &Board) -> Result<Vec<CheckInfo>, RulesError> {
    let king_sq = board.king_square(color).ok_or(RulesError::NoKing(color))?;
    let sight = board.without_friends_of(color);
    let mut infos = Vec::new();

    for template in base_templates(PieceKind::Queen) {
        let Template::Linear(ray) = template else {
            continue;
        };
        let run = linear_run_length(king_sq, ray.direction, ray.max_len, &sight);
        let Some(far) = king_sq.offset(ray.direction, run as i16) else {
            continue;
        };
        let Some(enemy) = sight.piece_at(far).filter(|p| p.color != color) else {
            continue;
        };
        let back = ray.direction.reversed();
        let Some(attack) = templates(enemy)
            .iter()
            .find(|t| t.attacks_along(back, run))
            .copied()
        else {
            continue;
        };

        let blockers: Vec<Square> = (1..run)
            .filter_map(|step| king_sq.offset(ray.direction, step as i16))
            .filter(|sq| board.is_occupied(*sq))
            .collect();
        match blockers.as_slice() {
            [] => {
                trace!(king = %king_sq, attacker = %far, "line check");
                infos.push(CheckInfo {
                    template: attack,
                    attacker: far,
                    cover: None,
                });
            }
            [cover] => {
                trace!(king = %king_sq, attacker = %far, pinned = %cover, "pin");
                infos.push(CheckInfo {
                    template: attack,
                    attacker: far,
                    cover: Some(*cover),
                });
            }
            _ => {}
        }
    }

    for sq in leaper_points(king_sq, KNIGHT_RADIUS_SQ)? {
        let Some(enemy) = board.piece_at(sq).filter(|p| p.color != color) else {
            continue;
        };
        if let Some(leap) = templates(enemy)
            .iter()
            .find(|t| t.leaps(KNIGHT_RADIUS_SQ))
            .copied()
        {
            trace!(king = %king_sq, attacker = %sq, "leap check");
            infos.push(CheckInfo {
                template: leap,
                attacker: sq,
                cover: None,
            });
        }
    }

    Ok(infos)
}

/// Returns true if any attack is live.
#[inline]
pub fn is_in_check(infos: &[CheckInfo]) -> bool {
    infos.iter().any(CheckInfo::is_live)
}

/// Returns true if the king of `color` is in check on `board`.
pub fn king_in_check(color: Color, board: &Board) -> Result<bool, RulesError> {
    Ok(is_in_check(&attacks_on_king(color, board)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn no_attacks_at_start() {
        let board = Board::standard();
        assert!(attacks_on_king(Color::White, &board).unwrap().is_empty());
        assert!(attacks_on_king(Color::Black, &board).unwrap().is_empty());
    }

    #[test]
    fn missing_king() {
        assert_eq!(
            attacks_on_king(Color::White, &Board::empty()),
            Err(RulesError::NoKing(Color::White))
        );
    }

    #[test]
    fn rook_on_open_file_checks() {
        let board = Board::empty()
            .with(sq("e1"), PieceKind::King, Color::White)
            .with(sq("e5"), PieceKind::Rook, Color::Black);
        let infos = attacks_on_king(Color::White, &board).unwrap();
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].attacker, sq("e5"));
        assert!(infos[0].is_live());
        assert!(is_in_check(&infos));
        assert_eq!(
            infos[0].resolving_squares(sq("e1")),
            vec![sq("e5"), sq("e2"), sq("e3"), sq("e4")]
        );
    }

    #[test]
    fn single_friend_is_pinned() {
        let board = Board::empty()
            .with(sq("e1"), PieceKind::King, Color::White)
            .with(sq("e3"), PieceKind::Bishop, Color::White)
            .with(sq("e8"), PieceKind::Queen, Color::Black);
        let infos = attacks_on_king(Color::White, &board).unwrap();
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].cover, Some(sq("e3")));
        assert!(!is_in_check(&infos));
    }

    #[test]
    fn two_friends_neutralize_line() {
        let board = Board::empty()
            .with(sq("e1"), PieceKind::King, Color::White)
            .with(sq("e3"), PieceKind::Bishop, Color::White)
            .with(sq("e4"), PieceKind::Knight, Color::White)
            .with(sq("e8"), PieceKind::Rook, Color::Black);
        assert!(attacks_on_king(Color::White, &board).unwrap().is_empty());
    }

    #[test]
    fn enemy_blocker_hides_attacker() {
        let board = Board::empty()
            .with(sq("e1"), PieceKind::King, Color::White)
            .with(sq("e4"), PieceKind::Knight, Color::Black)
            .with(sq("e8"), PieceKind::Rook, Color::Black);
        assert!(attacks_on_king(Color::White, &board).unwrap().is_empty());
    }

    #[test]
    fn bishop_does_not_attack_along_file() {
        let board = Board::empty()
            .with(sq("e1"), PieceKind::King, Color::White)
            .with(sq("e7"), PieceKind::Bishop, Color::Black);
        assert!(attacks_on_king(Color::White, &board).unwrap().is_empty());
    }

    #[test]
    fn pawn_attacks_forward_only() {
        let attacked = Board::empty()
            .with(sq("e4"), PieceKind::King, Color::White)
            .with(sq("d5"), PieceKind::Pawn, Color::Black);
        assert!(king_in_check(Color::White, &attacked).unwrap());

        let behind = Board::empty()
            .with(sq("e4"), PieceKind::King, Color::White)
            .with(sq("d3"), PieceKind::Pawn, Color::Black);
        assert!(!king_in_check(Color::White, &behind).unwrap());
    }

    #[test]
    fn knight_check_has_no_line() {
        let board = Board::empty()
            .with(sq("e1"), PieceKind::King, Color::White)
            .with(sq("f3"), PieceKind::Knight, Color::Black)
            .with(sq("d3"), PieceKind::Knight, Color::White);
        let infos = attacks_on_king(Color::White, &board).unwrap();
        assert_eq!(infos.len(), 1);
        assert!(infos[0].is_live());
        assert_eq!(infos[0].resolving_squares(sq("e1")), vec![sq("f3")]);
    }

    #[test]
    fn double_check() {
        let board = Board::empty()
            .with(sq("e1"), PieceKind::King, Color::White)
            .with(sq("e8"), PieceKind::Rook, Color::Black)
            .with(sq("d3"), PieceKind::Knight, Color::Black);
        let infos = attacks_on_king(Color::White, &board).unwrap();
        assert_eq!(infos.iter().filter(|i| i.is_live()).count(), 2);
    }

    #[test]
    fn adjacent_king_attacks() {
        let board = Board::empty()
            .with(sq("e1"), PieceKind::King, Color::White)
            .with(sq("e2"), PieceKind::King, Color::Black);
        assert!(king_in_check(Color::White, &board).unwrap());
    }
}
