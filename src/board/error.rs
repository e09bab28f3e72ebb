use common::Square;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum BoardError {
    #[error("Cannot put a piece on {square}, the square is already occupied")]
    SquareOccupiedBoardPutError { square: Square },
    #[error("Cannot apply chess move, the `from` square {square} holds none of the mover's pieces")]
    FromSquareIsEmptyMoveApplicationError { square: Square },
    #[error("Cannot apply en passant, there is no pawn to capture on {square}")]
    EnPassantDidNotResultInCaptureError { square: Square },
    #[error("Cannot apply castle, there is no rook on {square}")]
    CastleNonRookError { square: Square },
    #[error("Invalid castle move, king can only move 2 squares to left or right on its original rank")]
    InvalidCastleMoveError,
}
