use std::io::{self, Write};
use std::path::Path;

use rand::thread_rng;

use quest_chronicles::character::{validate_name, CharacterManager};
use quest_chronicles::combat::{AbilityEffect, Battle, BattleStatus};
use quest_chronicles::core::constants::REVIVE_COST_GOLD;
use quest_chronicles::data;
use quest_chronicles::items::inventory;
use quest_chronicles::items::ItemKind;
use quest_chronicles::quests::logic as quest_logic;
use quest_chronicles::{
    build_info, Character, CharacterClass, GameSession, ItemCatalog, QuestCatalog,
};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!(
                    "quest-chronicles {} ({})",
                    build_info::BUILD_DATE,
                    build_info::BUILD_COMMIT
                );
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Quest Chronicles - Text-Driven RPG\n");
                println!("Usage: quest-chronicles [OPTIONS]\n");
                println!("Options:");
                println!("  -v, --version    Show version information");
                println!("  -h, --help       Show this help message");
                std::process::exit(0);
            }
            arg => {
                eprintln!("Unknown argument: {}. Try --help.", arg);
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = run() {
        eprintln!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    display_welcome();

    let manager = CharacterManager::new()?;
    let (quests, items) = load_game_data(manager.save_dir())?;
    println!("Game data loaded: {} quests, {} items.", quests.len(), items.len());

    loop {
        println!("\n=== MAIN MENU ===");
        println!("1. New Game");
        println!("2. Load Game");
        println!("3. Exit");
        match prompt_choice("Enter your choice", 3) {
            1 => {
                if let Some(character) = new_game(&manager) {
                    let session = GameSession::new(character, quests.clone(), items.clone());
                    game_loop(session, &manager);
                }
            }
            2 => {
                if let Some(character) = load_game(&manager) {
                    let session = GameSession::new(character, quests.clone(), items.clone());
                    game_loop(session, &manager);
                }
            }
            _ => {
                println!("\nThanks for playing Quest Chronicles!");
                return Ok(());
            }
        }
    }
}

fn display_welcome() {
    println!("{}", "=".repeat(50));
    println!("     QUEST CHRONICLES - A TEXT-DRIVEN RPG");
    println!("{}", "=".repeat(50));
    println!("\nBuild your character, complete quests, and become a legend!");
}

/// Loads both catalogs, seeding default data files on first run.
fn load_game_data(data_dir: &Path) -> Result<(QuestCatalog, ItemCatalog), data::DataError> {
    data::ensure_default_data_files(data_dir)?;
    let quests = QuestCatalog::load(&data::quests_file(data_dir))?;
    let items = ItemCatalog::load(&data::items_file(data_dir))?;
    Ok((quests, items))
}

fn new_game(manager: &CharacterManager) -> Option<Character> {
    let name = loop {
        let input = prompt("Enter your character's name: ");
        match validate_name(&input) {
            Ok(()) => break input,
            Err(e) => println!("{}", e),
        }
    };

    println!("\nChoose your class:");
    let classes = CharacterClass::all();
    for (i, class) in classes.iter().enumerate() {
        let stats = class.base_stats();
        println!(
            "{}. {} (Health: {}, Strength: {}, Magic: {})",
            i + 1,
            class,
            stats.health,
            stats.strength,
            stats.magic
        );
    }
    let pick = prompt_choice("Enter your choice", classes.len() as u32);
    let class = classes[(pick - 1) as usize];

    let character = Character::new(name, class);
    match manager.save_character(&character) {
        Ok(()) => {
            println!("\nWelcome, {} the {}!", character.name, character.class);
            Some(character)
        }
        Err(e) => {
            println!("Could not create character: {}", e);
            None
        }
    }
}

fn load_game(manager: &CharacterManager) -> Option<Character> {
    let saves = match manager.list_characters() {
        Ok(saves) => saves,
        Err(e) => {
            println!("Could not read saves: {}", e);
            return None;
        }
    };
    if saves.is_empty() {
        println!("\nNo saved characters found.");
        return None;
    }

    println!("\n=== SAVED CHARACTERS ===");
    for (i, info) in saves.iter().enumerate() {
        if info.is_corrupted {
            println!("{}. {} (corrupted)", i + 1, info.character_name);
        } else {
            println!(
                "{}. {} (Level {} {})",
                i + 1,
                info.character_name,
                info.level,
                info.class_name
            );
        }
    }
    let pick = prompt_choice("Enter your choice", saves.len() as u32);
    let info = &saves[(pick - 1) as usize];

    match manager.load_character(&info.character_name) {
        Ok(character) => {
            println!("\nWelcome back, {}!", character.name);
            Some(character)
        }
        Err(e) => {
            println!("Could not load character: {}", e);
            None
        }
    }
}

fn game_loop(mut session: GameSession, manager: &CharacterManager) {
    loop {
        println!("\n=== GAME MENU ===");
        println!("1. View Character Stats");
        println!("2. Inventory");
        println!("3. Quest Hall");
        println!("4. Explore (Find Battles)");
        println!("5. Shop");
        println!("6. Save and Quit");
        match prompt_choice("Enter your choice", 6) {
            1 => view_character_stats(&session),
            2 => inventory_menu(&mut session),
            3 => quest_menu(&mut session),
            4 => explore(&mut session),
            5 => shop_menu(&mut session),
            _ => {
                save_game(&session, manager);
                println!("Returning to main menu.");
                return;
            }
        }

        if session.character.is_dead() && !handle_character_death(&mut session) {
            save_game(&session, manager);
            return;
        }
        save_game(&session, manager);
    }
}

fn save_game(session: &GameSession, manager: &CharacterManager) {
    if let Err(e) = manager.save_character(&session.character) {
        println!("Error saving game: {}", e);
    }
}

fn view_character_stats(session: &GameSession) {
    let c = &session.character;
    println!("\n=== CHARACTER STATS ===");
    println!("Name: {}", c.name);
    println!("Class: {}", c.class);
    println!("Level: {}", c.level);
    println!("Health: {}/{}", c.health, c.max_health);
    println!("Strength: {}", c.strength);
    println!("Magic: {}", c.magic);
    println!("Experience: {}/{}", c.experience, c.xp_to_next_level());
    println!("Gold: {}", c.gold);
    if let Some(weapon) = &c.equipped_weapon {
        println!("Weapon: {}", item_name(session, weapon));
    }
    if let Some(armor) = &c.equipped_armor {
        println!("Armor: {}", item_name(session, armor));
    }

    match quest_logic::quest_progress(c, &session.quests) {
        Ok(progress) => {
            println!(
                "Quests: {} active, {} completed ({:.1}% of all quests)",
                progress.active_count, progress.completed_count, progress.completion_percentage
            );
            println!(
                "Quest rewards earned: {} XP, {} gold",
                progress.total_rewards.xp, progress.total_rewards.gold
            );
        }
        Err(_) => println!("Quests: none available."),
    }
}

fn item_name(session: &GameSession, item_id: &str) -> String {
    session
        .items
        .get(item_id)
        .map(|item| item.name.clone())
        .unwrap_or_else(|| format!("Unknown Item ({})", item_id))
}

fn inventory_menu(session: &mut GameSession) {
    println!("\n=== INVENTORY ===");
    if session.character.inventory.is_empty()
        && session.character.equipped_weapon.is_none()
        && session.character.equipped_armor.is_none()
    {
        println!("Your inventory is empty.");
        return;
    }
    for (i, item_id) in session.character.inventory.iter().enumerate() {
        println!("{}. {}", i + 1, item_name(session, item_id));
    }
    if let Some(weapon) = &session.character.equipped_weapon {
        println!("Equipped weapon: {}", item_name(session, weapon));
    }
    if let Some(armor) = &session.character.equipped_armor {
        println!("Equipped armor: {}", item_name(session, armor));
    }

    println!("\n1. Use Item");
    println!("2. Equip Item");
    println!("3. Unequip Weapon");
    println!("4. Unequip Armor");
    println!("5. Back");
    match prompt_choice("Enter your choice", 5) {
        1 => {
            if let Some(item_id) = pick_inventory_item(session) {
                match inventory::use_item(&mut session.character, &session.items, &item_id) {
                    Ok(message) => println!("{}", message),
                    Err(e) => println!("{}", e),
                }
            }
        }
        2 => {
            if let Some(item_id) = pick_inventory_item(session) {
                equip_item(session, &item_id);
            }
        }
        3 => match inventory::unequip_weapon(&mut session.character, &session.items) {
            Ok(item_id) => println!("Unequipped {}.", item_name(session, &item_id)),
            Err(e) => println!("{}", e),
        },
        4 => match inventory::unequip_armor(&mut session.character, &session.items) {
            Ok(item_id) => println!("Unequipped {}.", item_name(session, &item_id)),
            Err(e) => println!("{}", e),
        },
        _ => {}
    }
}

fn pick_inventory_item(session: &GameSession) -> Option<String> {
    if session.character.inventory.is_empty() {
        println!("Your inventory is empty.");
        return None;
    }
    let pick = prompt_choice("Which item", session.character.inventory.len() as u32);
    Some(session.character.inventory[(pick - 1) as usize].clone())
}

fn equip_item(session: &mut GameSession, item_id: &str) {
    let kind = match session.items.get(item_id) {
        Some(item) => item.kind,
        None => {
            println!("Unknown item: {}", item_id);
            return;
        }
    };
    let result = match kind {
        ItemKind::Weapon => inventory::equip_weapon(&mut session.character, &session.items, item_id),
        ItemKind::Armor => inventory::equip_armor(&mut session.character, &session.items, item_id),
        ItemKind::Consumable => {
            println!("Consumables cannot be equipped. Use them instead.");
            return;
        }
    };
    match result {
        Ok(Some(previous)) => println!(
            "Equipped {} (unequipped {}).",
            item_name(session, item_id),
            item_name(session, &previous)
        ),
        Ok(None) => println!("Equipped {}.", item_name(session, item_id)),
        Err(e) => println!("{}", e),
    }
}

fn quest_menu(session: &mut GameSession) {
    println!("\n=== QUEST HALL ===");
    println!("1. View Active Quests");
    println!("2. View Available Quests");
    println!("3. View Completed Quests");
    println!("4. Accept Quest");
    println!("5. Turn In Quest");
    println!("6. Abandon Quest");
    println!("7. Back");
    match prompt_choice("Enter your choice", 7) {
        1 => {
            let active = quest_logic::active_quests(&session.character, &session.quests);
            if active.is_empty() {
                println!("No active quests.");
            }
            for quest in active {
                println!("- {} ({})", quest.title, quest.quest_id);
                println!("  {}", quest.description);
            }
        }
        2 => {
            let available = quest_logic::available_quests(&session.character, &session.quests);
            if available.is_empty() {
                println!("No quests available at your level.");
            }
            for quest in available {
                println!(
                    "- {} ({}) [Level {}+, Reward: {} XP / {} gold]",
                    quest.title,
                    quest.quest_id,
                    quest.required_level,
                    quest.reward_xp,
                    quest.reward_gold
                );
            }
        }
        3 => {
            let completed = quest_logic::completed_quests(&session.character, &session.quests);
            if completed.is_empty() {
                println!("No completed quests yet.");
            }
            for quest in completed {
                println!("- {} ({})", quest.title, quest.quest_id);
            }
        }
        4 => {
            let quest_id = prompt("Enter the quest id to accept: ");
            match quest_logic::accept_quest(&mut session.character, &session.quests, &quest_id) {
                Ok(()) => println!("Quest accepted: {}", quest_id),
                Err(e) => println!("{}", e),
            }
        }
        5 => {
            let quest_id = prompt("Enter the quest id to turn in: ");
            match quest_logic::complete_quest(&mut session.character, &session.quests, &quest_id) {
                Ok(rewards) => println!(
                    "Quest complete! Earned {} XP and {} gold.",
                    rewards.xp, rewards.gold
                ),
                Err(e) => println!("{}", e),
            }
        }
        6 => {
            let quest_id = prompt("Enter the quest id to abandon: ");
            match quest_logic::abandon_quest(&mut session.character, &quest_id) {
                Ok(()) => println!("Quest abandoned: {}", quest_id),
                Err(e) => println!("{}", e),
            }
        }
        _ => {}
    }
}

fn explore(session: &mut GameSession) {
    let enemy = match session.spawn_encounter() {
        Ok(enemy) => enemy,
        Err(e) => {
            println!("{}", e);
            return;
        }
    };
    println!("\nA wild {} appears!", enemy.name);

    let mut rng = thread_rng();
    let mut battle = Battle::new(&mut session.character, enemy);

    while battle.status() == BattleStatus::Active {
        println!(
            "\n{}: {}/{} HP | {}: {}/{} HP",
            battle.character().name,
            battle.character().health,
            battle.character().max_health,
            battle.enemy().name,
            battle.enemy().health,
            battle.enemy().max_health
        );
        println!("1. Attack");
        println!("2. Special Ability");
        println!("3. Attempt Escape");
        let acted = match prompt_choice("Enter your choice", 3) {
            1 => match battle.resolve_player_turn() {
                Ok(damage) => {
                    println!("You strike the {} for {} damage!", battle.enemy().name, damage);
                    true
                }
                Err(e) => {
                    println!("{}", e);
                    break;
                }
            },
            2 => match battle.use_special_ability() {
                Ok(outcome) => {
                    println!("{}", outcome.description);
                    if let AbilityEffect::Heal(_) = outcome.effect {
                        println!(
                            "Health restored to {}/{}.",
                            battle.character().health,
                            battle.character().max_health
                        );
                    }
                    true
                }
                Err(e) => {
                    println!("{}", e);
                    break;
                }
            },
            _ => match battle.attempt_escape(&mut rng) {
                Ok(true) => {
                    println!("You slip away from the battle!");
                    false
                }
                Ok(false) => {
                    println!("Escape failed!");
                    true
                }
                Err(e) => {
                    println!("{}", e);
                    break;
                }
            },
        };

        if acted && battle.status() == BattleStatus::Active {
            match battle.resolve_enemy_turn() {
                Ok(damage) => {
                    println!("The {} hits you for {} damage!", battle.enemy().name, damage)
                }
                Err(e) => {
                    println!("{}", e);
                    break;
                }
            }
            battle.complete_round();
        }
    }

    let status = battle.status();
    let outcome = battle.outcome();
    match status {
        BattleStatus::PlayerWon => {
            if let Some(outcome) = outcome {
                println!(
                    "\nVictory! You gain {} XP and {} gold.",
                    outcome.xp_gained, outcome.gold_gained
                );
                let before = session.character.level;
                session.apply_battle_rewards(&outcome);
                if session.character.level > before {
                    println!("Level up! You are now level {}.", session.character.level);
                }
            }
        }
        BattleStatus::EnemyWon => println!("\nYou have been defeated..."),
        BattleStatus::Escaped => println!("\nYou live to fight another day."),
        BattleStatus::Active => {}
    }
}

fn shop_menu(session: &mut GameSession) {
    println!("\n=== SHOP ===");
    println!("Your Gold: {}", session.character.gold);
    for item in session.items.iter() {
        println!(
            "- {} ({}): {} [{} gold]",
            item.name, item.item_id, item.effect, item.cost
        );
    }
    println!("\n1. Buy Item");
    println!("2. Sell Item");
    println!("3. Back");
    match prompt_choice("Enter your choice", 3) {
        1 => {
            let item_id = prompt("Enter the item id to buy: ");
            match inventory::purchase_item(&mut session.character, &session.items, &item_id) {
                Ok(()) => println!(
                    "Bought {}. Gold remaining: {}.",
                    item_name(session, &item_id),
                    session.character.gold
                ),
                Err(e) => println!("{}", e),
            }
        }
        2 => {
            if let Some(item_id) = pick_inventory_item(session) {
                match inventory::sell_item(&mut session.character, &session.items, &item_id) {
                    Ok(price) => println!(
                        "Sold {} for {} gold. Gold: {}.",
                        item_name(session, &item_id),
                        price,
                        session.character.gold
                    ),
                    Err(e) => println!("{}", e),
                }
            }
        }
        _ => {}
    }
}

/// Returns true if the character was revived and play continues.
fn handle_character_death(session: &mut GameSession) -> bool {
    println!("\n=== YOU HAVE DIED ===");
    println!("1. Revive (Cost: {} Gold)", REVIVE_COST_GOLD);
    println!("2. Quit to Main Menu");
    match prompt_choice("Enter your choice", 2) {
        1 => match session.character.spend_gold(REVIVE_COST_GOLD) {
            Ok(()) => {
                session.character.revive();
                println!(
                    "You awaken at {}/{} health.",
                    session.character.health, session.character.max_health
                );
                true
            }
            Err(e) => {
                println!("{}", e);
                println!("You cannot afford to be revived.");
                false
            }
        },
        _ => false,
    }
}

fn prompt(message: &str) -> String {
    print!("{}", message);
    let _ = io::stdout().flush();
    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_string()
}

fn prompt_choice(message: &str, max: u32) -> u32 {
    loop {
        let input = prompt(&format!("{} (1-{}): ", message, max));
        match input.parse::<u32>() {
            Ok(n) if (1..=max).contains(&n) => return n,
            _ => println!("Invalid choice. Please enter a number between 1 and {}.", max),
        }
    }
}
