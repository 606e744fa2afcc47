//! 将棋の対局ファイルを操作するコマンドラインツール
//!
//! 実行のたびにスナップショット JSON を読み込み、1つの操作を行って書き戻す。
//!
//! # 使用例
//!
//! ```bash
//! shogi-game new
//! shogi-game moves --from 6,0
//! shogi-game play --from 6,0 --to 5,0
//! shogi-game play --hand 歩 --to 4,4
//! shogi-game undo
//! shogi-game --game other.json show
//! ```

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use shogi_game_core::{
    Color, GameSnapshot, MoveCandidate, MoveOrigin, PieceType, ShogiGame, Square,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "shogi-game", version, about = "将棋の対局ファイルを操作する")]
struct Cli {
    /// 対局ファイル（スナップショット JSON）
    #[arg(long, env = "SHOGI_GAME_FILE", default_value = "game.json")]
    game: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// 1行の JSON で保存する
    #[arg(long)]
    compact: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// 平手の初期局面で対局ファイルを作る
    New {
        /// 既存のファイルを上書きする
        #[arg(long)]
        force: bool,
    },
    /// 盤面・持ち駒・手番を表示
    Show,
    /// 移動候補を表示
    Moves {
        /// 盤上の駒の位置（row,col）
        #[arg(long, required_unless_present = "hand", conflicts_with = "hand")]
        from: Option<Square>,
        /// 持ち駒の種類（歩 / P / pawn など）
        #[arg(long)]
        hand: Option<PieceType>,
        /// 持ち駒の持ち主（省略時は手番側）
        #[arg(long, requires = "hand")]
        owner: Option<Color>,
    },
    /// 手番側の指し手を実行
    Play {
        /// 移動元（row,col）
        #[arg(long, required_unless_present = "hand", conflicts_with = "hand")]
        from: Option<Square>,
        /// 打つ持ち駒の種類
        #[arg(long)]
        hand: Option<PieceType>,
        /// 移動先（row,col）
        #[arg(long)]
        to: Square,
        /// 成れるなら成る
        #[arg(long, conflicts_with = "hand")]
        promote: bool,
    },
    /// 直前の指し手を戻す
    Undo,
    /// 棋譜を表示
    History,
    /// 初期局面に戻す
    Reset,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.debug);
    run(cli)
}

fn init_logger(debug: bool) {
    use std::io::Write;
    let log_level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .write_style(env_logger::WriteStyle::Never)
    .target(env_logger::Target::Stderr)
    .init();
}

fn run(cli: Cli) -> Result<()> {
    let path = cli.game.as_path();
    match cli.cmd {
        Cmd::New { force } => {
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            let game = ShogiGame::new();
            save(path, &game, cli.compact)?;
            log::info!("created {}", path.display());
            println!("{game}");
        }
        Cmd::Show => {
            println!("{}", load(path)?);
        }
        Cmd::Moves { from, hand, owner } => {
            let game = load(path)?;
            let origin = origin_of(&game, from, hand, owner)?;
            let moves = game
                .available_moves(&origin)
                .with_context(|| format!("list moves for {origin}"))?;
            if moves.is_empty() {
                println!("{origin}: no moves");
            }
            for m in &moves {
                let mark = if m.can_promote { " 成可" } else { "" };
                println!("{origin} -> {} {}{mark}", m.to, usi_move(m));
            }
        }
        Cmd::Play {
            from,
            hand,
            to,
            promote,
        } => {
            let mut game = load(path)?;
            let origin = origin_of(&game, from, hand, None)?;
            ensure_side_to_move(&game, &origin)?;
            game.confirm_move(origin, to, promote)
                .with_context(|| format!("play {origin} -> {to}"))?;
            save(path, &game, cli.compact)?;
            if let Some(entry) = game.history().last() {
                log::info!("played {entry}");
            }
            println!("{game}");
        }
        Cmd::Undo => {
            let mut game = load(path)?;
            let entry = game.undo_move()?;
            save(path, &game, cli.compact)?;
            println!("undone: {entry}");
            println!("{game}");
        }
        Cmd::History => {
            let game = load(path)?;
            if game.history().is_empty() {
                println!("(no moves)");
            }
            for (i, entry) in game.history().iter().enumerate() {
                println!("{:>3}. {entry}", i + 1);
            }
        }
        Cmd::Reset => {
            let mut game = load(path)?;
            game.reset();
            save(path, &game, cli.compact)?;
            println!("{game}");
        }
    }
    Ok(())
}

/// `--from` / `--hand` から移動元を決める（持ち駒の持ち主は省略時に手番側）
fn origin_of(
    game: &ShogiGame,
    from: Option<Square>,
    hand: Option<PieceType>,
    owner: Option<Color>,
) -> Result<MoveOrigin> {
    match (from, hand) {
        (Some(sq), None) => {
            if !sq.is_on_board() {
                bail!("square {sq} is off the board");
            }
            Ok(MoveOrigin::Board(sq))
        }
        (None, Some(kind)) => Ok(MoveOrigin::hand(owner.unwrap_or(game.turn()), kind)),
        _ => bail!("specify exactly one of --from or --hand"),
    }
}

/// 手番側の駒でなければ拒否する（空きマスはエンジン側のエラーに任せる）
fn ensure_side_to_move(game: &ShogiGame, origin: &MoveOrigin) -> Result<()> {
    let owner = match *origin {
        MoveOrigin::Board(sq) => game.board().piece_on(sq).map(|p| p.owner),
        MoveOrigin::Hand { owner, .. } => Some(owner),
    };
    if let Some(owner) = owner
        && owner != game.turn()
    {
        bail!("it is {}'s turn, not {owner}'s", game.turn());
    }
    Ok(())
}

/// USI 形式の指し手（`7g7f+` / `P*5e`）
fn usi_move(m: &MoveCandidate) -> String {
    let to = m.to.to_usi().unwrap_or_default();
    match m.from {
        MoveOrigin::Board(from) => {
            let plus = if m.can_promote { "+" } else { "" };
            format!("{}{to}{plus}", from.to_usi().unwrap_or_default())
        }
        MoveOrigin::Hand { piece_type, .. } => format!("{}*{to}", piece_type.usi_char()),
    }
}

fn load(path: &Path) -> Result<ShogiGame> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read game file: {} (run `new` first?)", path.display()))?;
    let snapshot = GameSnapshot::from_json(&text)
        .with_context(|| format!("parse game file: {}", path.display()))?;
    Ok(ShogiGame::from_state(snapshot.into()))
}

/// 一時ファイルに書いてから置き換える
fn save(path: &Path, game: &ShogiGame, compact: bool) -> Result<()> {
    let snapshot = game.export_state();
    let text = if compact {
        snapshot.to_json()?
    } else {
        snapshot.to_json_pretty()?
    };
    let tmp = temp_path(path);
    fs::write(&tmp, text).with_context(|| format!("write temp file: {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("replace game file: {}", path.display()))?;
    log::debug!("saved {}", path.display());
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "game.json".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use shogi_game_core::Piece;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("shogi-game-cli-{}-{name}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join("game.json")
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("shogi-game").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_play_board_move() {
        let parsed = cli(&["--game", "x.json", "play", "--from", "3,4", "--to", "2,4", "--promote"]);
        assert_eq!(parsed.game, PathBuf::from("x.json"));
        match parsed.cmd {
            Cmd::Play {
                from,
                hand,
                to,
                promote,
            } => {
                assert_eq!(from, Some(Square::new(3, 4)));
                assert_eq!(hand, None);
                assert_eq!(to, Square::new(2, 4));
                assert!(promote);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_drop_and_conflicts() {
        let parsed = cli(&["play", "--hand", "歩", "--to", "4,4"]);
        assert!(matches!(
            parsed.cmd,
            Cmd::Play {
                hand: Some(PieceType::Pawn),
                from: None,
                ..
            }
        ));

        let both = ["shogi-game", "play", "--from", "6,0", "--hand", "P", "--to", "5,0"];
        assert!(Cli::try_parse_from(both).is_err());
        let neither = ["shogi-game", "moves"];
        assert!(Cli::try_parse_from(neither).is_err());
        let unknown = ["shogi-game", "moves", "--hand", "dummy"];
        assert!(Cli::try_parse_from(unknown).is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = scratch("roundtrip");
        let mut game = ShogiGame::new();
        game.confirm_move(MoveOrigin::board(6, 0), Square::new(5, 0), false).unwrap();

        save(&path, &game, true).unwrap();
        assert!(!temp_path(&path).exists());
        assert_eq!(load(&path).unwrap(), game);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_play_and_undo_through_run() {
        let path = scratch("play");
        let game = path.to_string_lossy().into_owned();
        let run_args = |args: &[&str]| {
            let mut full = vec!["--game", game.as_str()];
            full.extend_from_slice(args);
            run(cli(&full))
        };

        run_args(&["new", "--force"]).unwrap();
        assert!(run_args(&["new"]).is_err());
        run_args(&["play", "--from", "6,2", "--to", "5,2"]).unwrap();
        assert_eq!(load(&path).unwrap().turn(), Color::Gote);

        // 手番でない側の指し手はファイルを変えない
        assert!(run_args(&["play", "--from", "6,3", "--to", "5,3"]).is_err());
        assert_eq!(load(&path).unwrap().history().len(), 1);

        run_args(&["undo"]).unwrap();
        assert_eq!(load(&path).unwrap(), ShogiGame::new());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_play_rejects_piece_of_side_not_to_move() {
        let mut game = ShogiGame::empty();
        game.put_piece(Square::new(4, 4), Piece::new(PieceType::Gold, Color::Gote));
        game.add_to_hand(Color::Gote, PieceType::Pawn);

        let gold = MoveOrigin::board(4, 4);
        let pawn = MoveOrigin::hand(Color::Gote, PieceType::Pawn);
        assert!(ensure_side_to_move(&game, &gold).is_err());
        assert!(ensure_side_to_move(&game, &pawn).is_err());
        // 空きマスはエンジンの EmptySquare に任せる
        assert!(ensure_side_to_move(&game, &MoveOrigin::board(0, 0)).is_ok());

        game.set_turn(Color::Gote);
        assert!(ensure_side_to_move(&game, &gold).is_ok());
        assert!(ensure_side_to_move(&game, &pawn).is_ok());
    }

    #[test]
    fn test_usi_move_notation() {
        let step = MoveCandidate {
            from: MoveOrigin::board(6, 2),
            to: Square::new(5, 2),
            can_promote: false,
        };
        assert_eq!(usi_move(&step), "7g7f");

        let promoting = MoveCandidate {
            from: MoveOrigin::board(3, 4),
            to: Square::new(2, 4),
            can_promote: true,
        };
        assert_eq!(usi_move(&promoting), "5d5c+");

        let drop = MoveCandidate {
            from: MoveOrigin::hand(Color::Sente, PieceType::Pawn),
            to: Square::new(4, 4),
            can_promote: false,
        };
        assert_eq!(usi_move(&drop), "P*5e");
    }
}
