//! Human-readable position rendering.
//!
//! [`GameState`] implements [`Display`](fmt::Display) as a group-by-group
//! dump: each active pile group gets a dashed header, piles are printed as
//! tab-separated columns from the bottom up, empty piles show `[]`, and
//! face-down cards are masked as `##`. Foundations and the hole only show
//! their governing top card.

use std::fmt;

use super::card::Card;
use super::pile::PileRef;
use super::state::GameState;
use crate::rules::StockDealType;

const FOOTER: &str = "===================================";

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.foundations().is_empty() {
            write_header(f, "Foundations")?;
            write_tops(f, self, self.foundations())?;
        }
        if !self.cells().is_empty() {
            write_header(f, "Cells")?;
            write_columns(f, self, self.cells())?;
        }
        write_header(f, "Tableau Piles")?;
        write_columns(f, self, self.tableau())?;
        if !self.reserve().is_empty() {
            if self.rules().reserve_stacked {
                write_header(f, "Reserve (Stacked)")?;
            } else {
                write_header(f, "Reserve")?;
            }
            write_columns(f, self, self.reserve())?;
        }
        if let Some(stock) = self.stock() {
            if self.rules().stock_deal_type == StockDealType::Waste {
                write_header(f, "Stock | Waste")?;
                let waste = self.waste().expect("waste-dealing stock has a waste");
                write_columns(f, self, &[stock, waste])?;
            } else {
                write_header(f, "Stock")?;
                write_columns(f, self, &[stock])?;
            }
        }
        if let Some(hole) = self.hole() {
            write_header(f, "Hole Card")?;
            write_tops(f, self, &[hole])?;
        }
        write!(f, "{}", FOOTER)
    }
}

fn write_header(f: &mut fmt::Formatter<'_>, header: &str) -> fmt::Result {
    write!(f, "--- {} ", header)?;
    for _ in 0..20usize.saturating_sub(header.len()) {
        write!(f, "-")?;
    }
    writeln!(f)
}

fn write_card(f: &mut fmt::Formatter<'_>, card: Card) -> fmt::Result {
    if card.is_face_up() {
        write!(f, "{}", card)
    } else {
        write!(f, "##")
    }
}

/// One row per depth level, bottom row first; `[]` marks an empty pile.
fn write_columns(f: &mut fmt::Formatter<'_>, gs: &GameState, refs: &[PileRef]) -> fmt::Result {
    let depth = refs.iter().map(|&r| gs.pile(r).len()).max().unwrap_or(0);
    for row in 0..depth.max(1) {
        for &r in refs {
            let pile = gs.pile(r);
            match pile.cards().get(row) {
                Some(&card) => write_card(f, card)?,
                None if row == 0 => write!(f, "[]")?,
                None => {}
            }
            write!(f, "\t")?;
        }
        writeln!(f)?;
    }
    Ok(())
}

/// Only the top card of each pile, as foundations and the hole are read.
fn write_tops(f: &mut fmt::Formatter<'_>, gs: &GameState, refs: &[PileRef]) -> fmt::Result {
    for &r in refs {
        match gs.pile(r).top() {
            Some(card) => write_card(f, card)?,
            None => write!(f, "[]")?,
        }
        write!(f, "\t")?;
    }
    writeln!(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{GameVariant, SolRules};
    use std::sync::Arc;

    #[test]
    fn test_render_hole_variant() {
        let rules = Arc::new(SolRules::preset(GameVariant::SimpleBlackHole));
        let gs = crate::game::deck::deal_hole_game(rules, 3).unwrap();
        let out = gs.to_string();

        assert!(out.starts_with("--- Tableau Piles -------\n"));
        assert!(out.contains("--- Hole Card -----------\nAS\t\n"));
        assert!(out.ends_with(FOOTER));
        // Nine columns of three rows each
        let rows: Vec<&str> = out.lines().skip(1).take(3).collect();
        for row in rows {
            assert_eq!(row.matches('\t').count(), 9);
        }
    }

    #[test]
    fn test_render_marks_empty_and_face_down() {
        let rules = Arc::new(SolRules {
            tableau_pile_count: 2,
            cells: 1,
            ..SolRules::default()
        });
        let mut gs = GameState::new(rules);
        let t0 = gs.tableau()[0];
        gs.place_card(t0, Card::from_token("KS").unwrap().faced(false));
        let out = gs.to_string();

        assert!(out.contains("--- Cells ---------------\n[]\t\n"));
        assert!(out.contains("##\t[]\t\n"));
    }
}
