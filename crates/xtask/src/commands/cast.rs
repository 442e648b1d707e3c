//! Cast a spell in a sandbox world and print what happened.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;
use spell_core::{
    CastCost, EntityId, MagicError, Position, SandboxWorld, SpellWorld, TokenInventory, cast_spell,
};

use crate::utils;

/// Cast a spell book entry in a sandbox world
#[derive(Parser)]
pub struct Cast {
    /// Name of the spell book entry to cast
    #[arg(value_name = "SPELL")]
    spell: String,

    /// RON spell book (defaults to the bundled one)
    #[arg(short, long, value_name = "FILE")]
    book: Option<PathBuf>,

    /// Target tile as x,y
    #[arg(short, long, value_parser = utils::parse_position)]
    target: Option<Position>,

    /// Number of times to cast
    #[arg(short = 'n', long, default_value_t = 1)]
    times: u32,

    /// Casts worth of tokens in the caster's inventory
    #[arg(long, default_value_t = 1)]
    stock: u32,

    /// Cast without paying tokens
    #[arg(long)]
    free: bool,

    /// RNG seed for the sandbox world
    #[arg(short, long, default_value_t = 0)]
    seed: u64,
}

impl Cast {
    pub fn execute(self) -> Result<()> {
        let book = utils::load_book(self.book.as_deref())?;
        let spell = book
            .get(&self.spell)
            .ok_or_else(|| anyhow::anyhow!("Spell {:?} not found in the spell book", self.spell))?;

        let mut world = SandboxWorld::new(16, 16, self.seed);
        let player = world.add_actor("Player", Position::new(8, 8), 30);
        world.add_actor("goblin", Position::new(9, 8), 8);
        world.add_actor("orc", Position::new(11, 9), 15);
        world.add_actor("troll", Position::new(14, 14), 40);

        let mut inventory = TokenInventory::new();
        inventory.stock_for(spell, self.stock);
        let cost = if self.free {
            CastCost::Waived
        } else {
            CastCost::Charged
        };

        utils::print_spell(&format!("{}:", self.spell), spell);
        println!();

        for _ in 0..self.times {
            if let Err(err) = cast_spell(&mut world, player, &mut inventory, spell, self.target, cost) {
                println!(
                    "{} {err} [{}]",
                    style("Cast failed:").bold().red(),
                    err.error_code()
                );
            }
        }

        println!("{}", style("Messages:").bold().yellow());
        for (text, tone) in world.messages() {
            println!("  [{tone}] {text}");
        }
        println!();

        println!("{}", style("Actors:").bold().yellow());
        for actor in world.actors() {
            let hp = world
                .actor_state(actor.id)
                .map(|state| format!("{}/{}", state.hp, state.max_hp))
                .unwrap_or_default();
            let marker = if actor.id == EntityId::PLAYER { "*" } else { " " };
            println!("  {marker}{} {} at {} HP {hp}", actor.id, actor.name, actor.position);
        }
        println!();

        println!("{}", style("Inventory left:").bold().yellow());
        for stack in inventory.stacks() {
            println!("  {} x{}", stack.token, stack.count);
        }
        Ok(())
    }
}
