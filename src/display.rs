/// Rendering layer. All terminal I/O lives here.
///
/// The world emits draw commands in its 720×480 px view; `TerminalSurface`
/// collects one frame of them and `render` rasterises them into character
/// cells. No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use sharkie::anim::{BackgroundLayer, BarKind, Clip, PufferColor};
use sharkie::render::{DrawCommand, RenderSurface};
use sharkie::{GameResult, World};

/// Size of the world view in pixels.
const VIEW_W: f64 = 720.0;
const VIEW_H: f64 = 480.0;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_SEAFLOOR: Color = Color::DarkYellow;
const C_BARRIER: Color = Color::DarkGrey;
const C_HUD_HEALTH: Color = Color::Red;
const C_HUD_COINS: Color = Color::Yellow;
const C_HUD_POISON: Color = Color::Green;
const C_CHARACTER: Color = Color::White;
const C_FISH: Color = Color::Cyan;
const C_JELLY: Color = Color::Magenta;
const C_JELLY_DANGER: Color = Color::Yellow;
const C_BOSS: Color = Color::DarkRed;
const C_BUBBLE: Color = Color::Cyan;
const C_POISON: Color = Color::Green;
const C_COIN: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

// ── Surface ───────────────────────────────────────────────────────────────────

/// Collects the commands of the current frame.
#[derive(Default)]
pub struct TerminalSurface {
    commands: Vec<DrawCommand>,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSurface for TerminalSurface {
    fn clear(&mut self) {
        self.commands.clear();
    }

    fn draw(&mut self, cmd: &DrawCommand) {
        self.commands.push(*cmd);
    }
}

/// Character grid the commands are rasterised into. Rows 0 and `height-1`
/// are reserved for the HUD and the controls hint.
struct Grid {
    width: u16,
    height: u16,
    cells: Vec<Option<(char, Color)>>,
}

impl Grid {
    fn new(width: u16, height: u16) -> Self {
        Grid { width, height, cells: vec![None; width as usize * height as usize] }
    }

    fn put(&mut self, col: i32, row: i32, ch: char, color: Color) {
        let play_top = 1;
        let play_bottom = self.height as i32 - 2;
        if col < 0 || col >= self.width as i32 || row < play_top || row > play_bottom {
            return;
        }
        let idx = row as usize * self.width as usize + col as usize;
        self.cells[idx] = Some((ch, color));
    }

    fn text(&mut self, col: i32, row: i32, s: &str, color: Color) {
        for (i, ch) in s.chars().enumerate() {
            self.put(col + i as i32, row, ch, color);
        }
    }

    fn col(&self, x: f64) -> i32 {
        (x / VIEW_W * f64::from(self.width)).floor() as i32
    }

    fn row(&self, y: f64) -> i32 {
        let rows = f64::from(self.height.saturating_sub(2));
        1 + (y / VIEW_H * rows).floor() as i32
    }
}

// ── Sprite glyphs ─────────────────────────────────────────────────────────────

/// Text token and colour for one clip frame, in the sprite's native facing.
fn glyph(clip: Clip, frame: usize) -> (&'static str, Color) {
    match clip {
        Clip::CharacterIdle | Clip::CharacterSwim => ("><(((°>", C_CHARACTER),
        Clip::CharacterSleep => (if frame >= 10 { "><(((-> z" } else { "><(((->" }, C_CHARACTER),
        Clip::CharacterDead => ("><(((x>", Color::DarkGrey),
        Clip::CharacterPoisoned => ("><(((°>", C_POISON),
        Clip::CharacterShock => ("><(((°>", C_JELLY_DANGER),
        Clip::CharacterBubbleAttack => ("><(((°o", C_BUBBLE),
        Clip::CharacterPoisonAttack => ("><(((°o", C_POISON),
        Clip::FishSwim => ("<><", C_FISH),
        Clip::PufferSwim(c) => ("<o)", puffer_color(c)),
        Clip::PufferTransition(c) => ("<o@)", puffer_color(c)),
        Clip::PufferInflated(c) => ("<@@@)", puffer_color(c)),
        Clip::PufferDead(c) => ("<x)", puffer_color(c)),
        Clip::JellySwim => ("{~}", C_JELLY),
        Clip::JellyDangerous => ("{#}", C_JELLY_DANGER),
        Clip::JellyDeadLila => ("{x}", C_JELLY),
        Clip::JellyDeadGreen => ("{x}", C_POISON),
        Clip::BossIntro => ("~=#####=~", C_BOSS),
        Clip::BossFloat => ("<=#####=<", C_BOSS),
        Clip::BossAttack => ("<<#####=<", Color::Red),
        Clip::BossHurt => ("<=#*#*#=<", Color::Magenta),
        Clip::BossDead => ("x=#####=x", Color::DarkGrey),
        Clip::Bubble => ("o", C_BUBBLE),
        Clip::PoisonBubble => ("o", C_POISON),
        Clip::Coin => (if frame % 2 == 0 { "$" } else { "S" }, C_COIN),
        Clip::PoisonLeft | Clip::PoisonRight => ("!", C_POISON),
        Clip::Background(..) | Clip::Barrier | Clip::StatusBar(_) => ("", C_HINT),
    }
}

fn puffer_color(c: PufferColor) -> Color {
    match c {
        PufferColor::Red => Color::Red,
        PufferColor::Green => Color::Green,
    }
}

/// Mirror a token horizontally.
fn mirror(s: &str) -> String {
    s.chars()
        .rev()
        .map(|c| match c {
            '<' => '>',
            '>' => '<',
            '(' => ')',
            ')' => '(',
            '{' => '}',
            '}' => '{',
            other => other,
        })
        .collect()
}

fn rasterise(grid: &mut Grid, cmd: &DrawCommand) {
    match cmd.sprite.clip {
        Clip::Background(BackgroundLayer::Floor, _) => {
            let row = grid.row(cmd.y + cmd.height * 0.9);
            for col in grid.col(cmd.x)..grid.col(cmd.x + cmd.width) {
                grid.put(col, row, '~', C_SEAFLOOR);
            }
        }
        Clip::Background(..) => {}
        Clip::Barrier => {
            let top = grid.row(cmd.y + cmd.height * 0.55);
            for row in top..=grid.row(cmd.y + cmd.height) {
                for col in grid.col(cmd.x + cmd.width * 0.2)..grid.col(cmd.x + cmd.width * 0.8) {
                    grid.put(col, row, '░', C_BARRIER);
                }
            }
        }
        // HUD bars are drawn on the status row by `draw_hud`.
        Clip::StatusBar(_) => {}
        clip => {
            let (token, color) = glyph(clip, cmd.sprite.frame);
            let token = if cmd.h_flip { mirror(token) } else { token.to_string() };
            let len = token.chars().count() as i32;
            let col = grid.col(cmd.x + cmd.width * 0.5) - len / 2;
            let row = grid.row(cmd.y + cmd.height * 0.5);
            grid.text(col, row, &token, color);
        }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, surface: &TerminalSurface, world: &World) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let mut grid = Grid::new(width, height);
    for cmd in &surface.commands {
        rasterise(&mut grid, cmd);
    }

    out.queue(terminal::Clear(terminal::ClearType::All))?;
    for row in 1..height.saturating_sub(1) {
        for col in 0..width {
            if let Some((ch, color)) = grid.cells[row as usize * width as usize + col as usize] {
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(style::SetForegroundColor(color))?;
                out.queue(Print(ch))?;
            }
        }
    }

    draw_hud(out, surface, world)?;
    draw_controls_hint(out, height)?;

    if let Some(result) = world.outcome() {
        draw_game_over(out, result, world, width, height)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, surface: &TerminalSurface, world: &World) -> std::io::Result<()> {
    let mut col = 1;
    for cmd in &surface.commands {
        let Clip::StatusBar(kind) = cmd.sprite.clip else {
            continue;
        };
        let (label, color) = match kind {
            BarKind::Health => ("HP", C_HUD_HEALTH),
            BarKind::Coins => ("Coins", C_HUD_COINS),
            BarKind::Poison => ("Poison", C_HUD_POISON),
        };
        let filled = cmd.sprite.frame.min(5);
        let bar = format!("{label} [{}{}] ", "█".repeat(filled), "·".repeat(5 - filled));
        out.queue(cursor::MoveTo(col, 0))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(&bar))?;
        col += bar.chars().count() as u16 + 1;
    }

    if !world.game_ended() {
        let counts = format!("x{} ☠{}", world.coins_collected(), world.poison_ammo());
        out.queue(cursor::MoveTo(col, 0))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(counts))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → ↑ ↓ : Swim   D : Bubble   SPACE : Poison   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    result: GameResult,
    world: &World,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let (banner, color) = match result {
        GameResult::Win => ("║     YOU  WIN     ║", Color::Green),
        GameResult::Lose => ("║    GAME  OVER    ║", Color::Red),
    };
    let coins_line = format!("Coins: {}", world.coins_collected());
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", color),
        (banner, color),
        ("╚══════════════════╝", color),
        (&coins_line, Color::Yellow),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirror_swaps_brackets() {
        assert_eq!(mirror("><(((°>"), "<°)))><");
        assert_eq!(mirror("{~}"), "{~}");
    }
}
