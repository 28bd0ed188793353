pub mod game_row;
pub mod score_card;
