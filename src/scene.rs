//! Per-tick scene state driven by an external frame loop
//!
//! The frame loop owns a [`Scene`] and calls [`Scene::tick`] once per frame
//! with whatever [`Renderer`] it draws through.

use crate::config::Options;
use crate::dialogue::{DialogueMap, KeyValueParser};
use crate::io::LineStore;
use crate::select::CyclicSelector;
use crate::time::{IntervalTimer, SystemClock, TimeSource};

pub const SPRITE_Y: i32 = 500;
pub const SPRITE_STEP: i32 = 50;
/// Screen width minus sprite width
pub const SPRITE_MAX_X: i32 = 1152;
pub const SPRITE_FRAMES: i32 = 4;

pub const DIALOGUE_POS: (i32, i32) = (100, 250);
pub const CAPTION_POS: (i32, i32) = (1000, 640);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const CAPTION: Color = Color::new(200, 200, 75);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteInfo {
    pub x: i32,
    pub y: i32,
    pub tag: String,
}

/// Drawing surface supplied by the frame loop
pub trait Renderer {
    fn draw_sprite(&mut self, x: i32, y: i32, tag: &str);
    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color);
}

/// Lay sprites out left to right along one row, cycling tags `r1`..`r4`
pub fn sprite_row() -> Vec<SpriteInfo> {
    (0..=SPRITE_MAX_X)
        .step_by(SPRITE_STEP as usize)
        .map(|x| SpriteInfo {
            x,
            y: SPRITE_Y,
            tag: format!("r{}", (x / SPRITE_STEP) % SPRITE_FRAMES + 1),
        })
        .collect()
}

#[derive(Debug)]
pub struct Scene<C: TimeSource = SystemClock> {
    sprites: Vec<SpriteInfo>,
    dialogue: DialogueMap,
    dialogue_key: String,
    caption: String,
    timer: IntervalTimer<C>,
    selector: CyclicSelector,
}

impl<C: TimeSource> Scene<C> {
    pub fn new(
        sprites: Vec<SpriteInfo>,
        dialogue: DialogueMap,
        dialogue_key: &str,
        caption: &str,
        timer: IntervalTimer<C>,
    ) -> Self {
        let selector = CyclicSelector::new(sprites.len());
        if !dialogue.contains(dialogue_key) {
            log::debug!("Dialogue key {:?} not loaded; no dialogue will be shown", dialogue_key);
        }
        Self {
            sprites,
            dialogue,
            dialogue_key: dialogue_key.to_string(),
            caption: caption.to_string(),
            timer,
            selector,
        }
    }

    pub fn sprites(&self) -> &[SpriteInfo] {
        &self.sprites
    }

    pub fn dialogue(&self) -> &DialogueMap {
        &self.dialogue
    }

    pub fn selector(&self) -> &CyclicSelector {
        &self.selector
    }

    pub fn timer(&self) -> &IntervalTimer<C> {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut IntervalTimer<C> {
        &mut self.timer
    }

    pub fn current_sprite(&self) -> Option<&SpriteInfo> {
        self.selector.select(&self.sprites)
    }

    pub fn current_dialogue(&self) -> Option<&str> {
        self.dialogue.get(&self.dialogue_key)
    }

    /// Run one frame: step the selector if due, then draw.
    ///
    /// Returns whether the selector consumed a due tick.
    pub fn tick<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> bool {
        let stepped = self.selector.advance_if_due(&mut self.timer);

        if let Some(sprite) = self.selector.select(&self.sprites) {
            log::trace!("Displaying sprite {} at ({}, {})", sprite.tag, sprite.x, sprite.y);
            renderer.draw_sprite(sprite.x, sprite.y, &sprite.tag);
        }
        if let Some(line) = self.dialogue.get(&self.dialogue_key) {
            renderer.draw_text(DIALOGUE_POS.0, DIALOGUE_POS.1, line, Color::WHITE);
        }
        renderer.draw_text(CAPTION_POS.0, CAPTION_POS.1, &self.caption, Color::CAPTION);

        stepped
    }
}

/// Load the dialogue file named in `options` and lay out the sprite row.
///
/// A missing or partly malformed dialogue file still yields a scene; the
/// store and the lenient load report what went wrong.
pub fn build_scene(options: &Options) -> Scene {
    let store = LineStore::open(&options.dialogue_file);
    let parser = KeyValueParser::new(options.delimiter);
    let (dialogue, skipped) = DialogueMap::load_lenient(&store, &parser);
    log::info!("Loaded {} dialogue entries ({} skipped)", dialogue.len(), skipped.len());

    let sprites = sprite_row();
    for sprite in &sprites {
        log::debug!("Added sprite: {} at ({}, {})", sprite.tag, sprite.x, sprite.y);
    }

    Scene::new(
        sprites,
        dialogue,
        &options.dialogue_key,
        &options.caption,
        IntervalTimer::new(options.interval_ms),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualClock;
    use std::time::Duration;

    #[derive(Default)]
    struct Recorder {
        sprites: Vec<(i32, i32, String)>,
        texts: Vec<(i32, i32, String, Color)>,
    }

    impl Renderer for Recorder {
        fn draw_sprite(&mut self, x: i32, y: i32, tag: &str) {
            self.sprites.push((x, y, tag.to_string()));
        }

        fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color) {
            self.texts.push((x, y, text.to_string(), color));
        }
    }

    #[test]
    fn test_sprite_row_layout() {
        let row = sprite_row();

        assert_eq!(row.len(), 24);
        assert_eq!(row[0], SpriteInfo { x: 0, y: 500, tag: "r1".into() });
        assert_eq!(row[3].tag, "r4");
        assert_eq!(row[4].tag, "r1");
        assert_eq!(row[23].x, 1150);
        assert!(row.iter().all(|s| s.y == SPRITE_Y));
    }

    #[test]
    fn test_tick_draws_sprite_dialogue_and_caption() {
        let clock = ManualClock::new();
        let mut dialogue = DialogueMap::new();
        dialogue.insert("string1", "Sleep...");
        let timer = IntervalTimer::with_clock(Duration::from_millis(250), clock.clone());
        let mut scene = Scene::new(sprite_row(), dialogue, "string1", "Caption", timer);
        let mut rec = Recorder::default();

        assert!(!scene.tick(&mut rec));
        assert_eq!(rec.sprites, vec![(0, 500, "r1".to_string())]);
        assert_eq!(
            rec.texts,
            vec![
                (100, 250, "Sleep...".to_string(), Color::WHITE),
                (1000, 640, "Caption".to_string(), Color::CAPTION),
            ]
        );

        clock.advance_ms(250);
        assert!(scene.tick(&mut rec));
        assert_eq!(rec.sprites[1], (50, 500, "r2".to_string()));
        assert_eq!(scene.selector().current(), 1);
    }

    #[test]
    fn test_tick_missing_dialogue_key() {
        let clock = ManualClock::new();
        let timer = IntervalTimer::with_clock(Duration::from_millis(250), clock);
        let mut scene = Scene::new(sprite_row(), DialogueMap::new(), "string1", "c", timer);
        let mut rec = Recorder::default();

        scene.tick(&mut rec);
        assert_eq!(scene.current_dialogue(), None);
        assert_eq!(rec.texts.len(), 1);
    }

    #[test]
    fn test_tick_without_sprites() {
        let clock = ManualClock::new();
        let timer = IntervalTimer::with_clock(Duration::from_millis(1), clock.clone());
        let mut scene = Scene::new(Vec::new(), DialogueMap::new(), "k", "c", timer);
        let mut rec = Recorder::default();

        clock.advance_ms(5);
        assert!(scene.tick(&mut rec));
        assert!(rec.sprites.is_empty());
        assert_eq!(scene.current_sprite(), None);
    }
}
