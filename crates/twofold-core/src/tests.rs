#[cfg(test)]
mod tests {
    use crate::commands::PlayerCommand;
    use crate::enums::*;
    use crate::error::EngineError;
    use crate::events::GameEvent;
    use crate::state::{GameStateSnapshot, ScoreView};
    use crate::types::{MoveOutcome, SpawnedTile};

    #[test]
    fn test_direction_deltas() {
        assert_eq!(Direction::Up.delta(), (-1, 0));
        assert_eq!(Direction::Down.delta(), (1, 0));
        assert_eq!(Direction::Left.delta(), (0, -1));
        assert_eq!(Direction::Right.delta(), (0, 1));
    }

    #[test]
    fn test_direction_from_index() {
        for (i, dir) in (0u8..).zip(Direction::ALL) {
            assert_eq!(Direction::from_index(i).unwrap(), dir);
        }
        assert_eq!(
            Direction::from_index(4),
            Err(EngineError::InvalidDirection("4".to_string()))
        );
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("UP".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!(" left ".parse::<Direction>().unwrap(), Direction::Left);
        assert_eq!("r".parse::<Direction>().unwrap(), Direction::Right);
        assert!(matches!(
            "diagonal".parse::<Direction>(),
            Err(EngineError::InvalidDirection(_))
        ));
        for dir in Direction::ALL {
            assert_eq!(dir.to_string().parse::<Direction>().unwrap(), dir);
        }
    }

    /// Directions serialize as lowercase names.
    #[test]
    fn test_direction_serde() {
        let json = serde_json::to_string(&Direction::Down).unwrap();
        assert_eq!(json, "\"down\"");
        let back: Direction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Direction::Down);
        assert!(serde_json::from_str::<Direction>("\"sideways\"").is_err());
    }

    /// Verify PlayerCommand round-trips through serde (tagged union).
    #[test]
    fn test_player_command_serde() {
        let commands = vec![
            PlayerCommand::Slide {
                direction: Direction::Left,
            },
            PlayerCommand::NewGame,
            PlayerCommand::ResetGame,
            PlayerCommand::Quit,
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: PlayerCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(*cmd, back);
        }

        let parsed: PlayerCommand =
            serde_json::from_str(r#"{"type":"Slide","direction":"up"}"#).unwrap();
        assert_eq!(
            parsed,
            PlayerCommand::Slide {
                direction: Direction::Up
            }
        );
    }

    #[test]
    fn test_game_event_serde() {
        let events = vec![
            GameEvent::Slid {
                direction: Direction::Right,
                score_delta: 8,
            },
            GameEvent::TileSpawned {
                row: 1,
                col: 3,
                value: 4,
            },
            GameEvent::NewBestScore { score: 1024 },
            GameEvent::RoundStarted { played_round: 7 },
            GameEvent::GameOver { score: 2000 },
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let back: GameEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(*event, back);
        }
    }

    #[test]
    fn test_snapshot_serde() {
        let snapshot = GameStateSnapshot {
            phase: GamePhase::Playing,
            rows: 2,
            cols: 2,
            grid: vec![vec![2, 0], vec![0, 16]],
            score: ScoreView {
                score: 12,
                best: 40,
                played_round: 3,
            },
            terminal: false,
            events: vec![GameEvent::NewBestScore { score: 12 }],
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, back);
        assert_eq!(back.max_tile(), 16);
        assert_eq!(GameStateSnapshot::default().max_tile(), 0);
    }

    #[test]
    fn test_outcome_defaults() {
        assert_eq!(MoveOutcome::default(), MoveOutcome::NONE);
        let tile = SpawnedTile {
            row: 0,
            col: 1,
            value: 2,
        };
        let json = serde_json::to_string(&tile).unwrap();
        assert_eq!(serde_json::from_str::<SpawnedTile>(&json).unwrap(), tile);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            EngineError::InvalidDimensions { rows: 0, cols: 4 }.to_string(),
            "invalid grid dimensions 0x4"
        );
        assert!(EngineError::InvalidTile { value: 3 }
            .to_string()
            .contains("power of two"));
    }
}
