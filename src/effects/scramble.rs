use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use gloo_timers::future::TimeoutFuture;
use log::info;
use rand::Rng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;

use crate::dom;

pub const GLYPHS: &str = "!<>-_\\/[]{}—=+*^?#________";
const WINDOW: u32 = 40;
const REROLL_CHANCE: f64 = 0.28;
const PHRASE_PAUSE_MS: u32 = 2_000;

#[derive(Clone, Debug)]
struct Slot {
    from: Option<char>,
    to: Option<char>,
    start: u32,
    end: u32,
    glyph: Option<char>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Piece {
    Text(char),
    Glyph(char),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub pieces: Vec<Piece>,
    pub complete: bool,
}

impl Frame {
    #[cfg(test)]
    pub fn to_plain(&self) -> String {
        self.pieces
            .iter()
            .map(|p| match p {
                Piece::Text(c) | Piece::Glyph(c) => *c,
            })
            .collect()
    }

    /// Markup for the frame; scrambling glyphs are wrapped in `span.dud`.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Text(c) => push_escaped(&mut out, *c),
                Piece::Glyph(c) => {
                    out.push_str("<span class=\"dud\">");
                    push_escaped(&mut out, *c);
                    out.push_str("</span>");
                }
            }
        }
        out
    }
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '&' => out.push_str("&amp;"),
        '"' => out.push_str("&quot;"),
        _ => out.push(c),
    }
}

/// One run of the scramble transition from `from` to `to`. Progress is
/// counted in frames, not wall time.
#[derive(Clone, Debug)]
pub struct Scramble {
    queue: Vec<Slot>,
    frame: u32,
}

impl Scramble {
    pub fn new(from: &str, to: &str, rng: &mut impl Rng) -> Self {
        let from: Vec<char> = from.chars().collect();
        let to: Vec<char> = to.chars().collect();
        let len = from.len().max(to.len());
        let queue = (0..len)
            .map(|i| {
                let start = rng.gen_range(0..WINDOW);
                let end = start + rng.gen_range(0..WINDOW);
                Slot { from: from.get(i).copied(), to: to.get(i).copied(), start, end, glyph: None }
            })
            .collect();
        Self { queue, frame: 0 }
    }

    #[cfg(test)]
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Renders the current frame, then advances unless everything has landed.
    pub fn tick(&mut self, rng: &mut impl Rng) -> Frame {
        let mut pieces = Vec::with_capacity(self.queue.len());
        let mut landed = 0;

        for slot in self.queue.iter_mut() {
            if self.frame >= slot.end {
                landed += 1;
                pieces.extend(slot.to.map(Piece::Text));
            } else if self.frame >= slot.start {
                let glyph = match slot.glyph {
                    Some(g) if !rng.gen_bool(REROLL_CHANCE) => g,
                    _ => random_glyph(rng),
                };
                slot.glyph = Some(glyph);
                pieces.push(Piece::Glyph(glyph));
            } else {
                pieces.extend(slot.from.map(Piece::Text));
            }
        }

        let complete = landed == self.queue.len();
        if !complete {
            self.frame += 1;
        }
        Frame { pieces, complete }
    }
}

fn random_glyph(rng: &mut impl Rng) -> char {
    let glyphs: Vec<char> = GLYPHS.chars().collect();
    glyphs[rng.gen_range(0..glyphs.len())]
}

/// Which run owns the element. Starting a run drops the previous run's
/// sender, so its receiver resolves `Canceled`.
#[derive(Debug, Default)]
struct RunControl {
    generation: u64,
    pending_frame: Option<i32>,
    done: Option<oneshot::Sender<()>>,
}

impl RunControl {
    /// Returns the new run's generation, the frame request the old run left
    /// pending and the receiver for the new run.
    fn restart(&mut self) -> (u64, Option<i32>, oneshot::Receiver<()>) {
        let (done_tx, done_rx) = oneshot::channel();
        self.generation += 1;
        self.done = Some(done_tx);
        (self.generation, self.pending_frame.take(), done_rx)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    fn set_pending_frame(&mut self, generation: u64, id: Option<i32>) {
        if self.is_current(generation) {
            self.pending_frame = id;
        }
    }

    /// Resolves the run's receiver. Stale generations are ignored.
    fn finish(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.pending_frame = None;
        if let Some(tx) = self.done.take() {
            let _ = tx.send(());
        }
        true
    }
}

/// Scrambles an element's text into new text, one animation frame at a time.
/// Starting a new run abandons the one in flight.
#[derive(Clone)]
pub struct TextScramble {
    el: HtmlElement,
    control: Rc<RefCell<RunControl>>,
    frame_loop: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl TextScramble {
    pub fn new(el: HtmlElement) -> Self {
        Self {
            el,
            control: Rc::new(RefCell::new(RunControl::default())),
            frame_loop: Rc::new(RefCell::new(None)),
        }
    }

    /// Resolves with `Ok` once the new text is fully shown, or with
    /// `Err(Canceled)` if another `set_text` call takes over first.
    pub fn set_text(&self, text: &str) -> oneshot::Receiver<()> {
        let (generation, stale_frame, done_rx) = self.control.borrow_mut().restart();
        if let (Some(id), Ok(window)) = (stale_frame, dom::window()) {
            let _ = window.cancel_animation_frame(id);
        }

        let mut scramble = Scramble::new(&self.el.inner_text(), text, &mut rand::thread_rng());
        let this = self.clone();

        *self.frame_loop.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if !this.control.borrow().is_current(generation) {
                return;
            }
            let rendered = scramble.tick(&mut rand::thread_rng());
            this.el.set_inner_html(&rendered.to_html());
            if rendered.complete {
                this.control.borrow_mut().finish(generation);
                this.frame_loop.borrow_mut().take();
                return;
            }
            if let (Ok(window), Some(cb)) = (dom::window(), this.frame_loop.borrow().as_ref()) {
                let id = window.request_animation_frame(cb.as_ref().unchecked_ref()).ok();
                this.control.borrow_mut().set_pending_frame(generation, id);
            }
        }) as Box<dyn FnMut()>));

        let first_frame = self
            .frame_loop
            .borrow()
            .as_ref()
            .map(|cb| cb.as_ref().unchecked_ref::<js_sys::Function>().clone());
        if let Some(first_frame) = first_frame {
            let _ = first_frame.call0(&JsValue::NULL);
        }
        done_rx
    }
}

/// Phrases from `data-scramble` (separated by `|`).
pub fn parse_phrases(attr: &str) -> Vec<String> {
    attr.split('|')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Cycles every `[data-scramble]` element through its phrases.
pub fn init_scramble_text() -> Result<(), JsValue> {
    let elements = dom::query_all("[data-scramble]")?;
    for el in &elements {
        let phrases = parse_phrases(&el.get_attribute("data-scramble").unwrap_or_default());
        let Ok(el) = el.clone().dyn_into::<HtmlElement>() else {
            continue;
        };
        if phrases.is_empty() {
            continue;
        }
        let fx = TextScramble::new(el);
        spawn_local(async move {
            for phrase in phrases.iter().cycle() {
                if fx.set_text(phrase).await.is_err() {
                    return;
                }
                TimeoutFuture::new(PHRASE_PAUSE_MS).await;
            }
        });
    }
    if !elements.is_empty() {
        info!("Scramble text running on {} elements", elements.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn run(from: &str, to: &str, seed: u64) -> (Scramble, Vec<Frame>) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut scramble = Scramble::new(from, to, &mut rng);
        let mut frames = Vec::new();
        loop {
            let frame = scramble.tick(&mut rng);
            let complete = frame.complete;
            frames.push(frame);
            if complete {
                return (scramble, frames);
            }
            assert!(frames.len() < 200, "scramble never finished");
        }
    }

    #[test]
    fn ends_on_target_text() {
        for seed in 0..20 {
            let (scramble, frames) = run("AB", "XY", seed);
            let last = frames.last().unwrap();
            assert_eq!(last.to_plain(), "XY");
            assert!(scramble.queue.iter().all(|s| scramble.frame() >= s.end));
        }
    }

    #[test]
    fn completes_within_the_frame_window() {
        let (scramble, frames) = run("Website Weaver", "Digital craft", 7);
        let latest_end = scramble.queue.iter().map(|s| s.end).max().unwrap();
        assert_eq!(scramble.frame(), latest_end);
        assert_eq!(frames.len() as u32, latest_end + 1);
        assert!(latest_end < 2 * WINDOW);
    }

    #[test]
    fn pads_to_longer_text() {
        let (_, frames) = run("Hello world", "Hi", 3);
        assert_eq!(frames.last().unwrap().to_plain(), "Hi");
        let (_, frames) = run("Hi", "Hello world", 3);
        assert_eq!(frames.last().unwrap().to_plain(), "Hello world");
    }

    #[test]
    fn first_frame_shows_original_or_glyphs() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut scramble = Scramble::new("abc", "xyz", &mut rng);
        let frame = scramble.tick(&mut rng);
        for (piece, original) in frame.pieces.iter().zip("abc".chars()) {
            match piece {
                Piece::Text(c) => assert!(*c == original || "xyz".contains(*c)),
                Piece::Glyph(g) => assert!(GLYPHS.contains(*g)),
            }
        }
    }

    #[test]
    fn empty_texts_finish_immediately() {
        let (_, frames) = run("", "", 0);
        assert_eq!(frames.len(), 1);
        assert!(frames[0].pieces.is_empty());
    }

    #[test]
    fn glyphs_are_escaped_in_markup() {
        let frame = Frame { pieces: vec![Piece::Text('a'), Piece::Glyph('<')], complete: false };
        assert_eq!(frame.to_html(), "a<span class=\"dud\">&lt;</span>");
    }

    #[test]
    fn restart_cancels_the_run_in_flight() {
        let mut control = RunControl::default();
        let (first, _, mut first_rx) = control.restart();
        control.set_pending_frame(first, Some(17));

        let (second, stale_frame, mut second_rx) = control.restart();
        assert_eq!(stale_frame, Some(17));
        assert!(first_rx.try_recv().is_err());
        assert!(!control.is_current(first));

        assert!(!control.finish(first));
        assert_eq!(second_rx.try_recv(), Ok(None));

        assert!(control.finish(second));
        assert_eq!(second_rx.try_recv(), Ok(Some(())));
    }

    #[test]
    fn stale_run_cannot_claim_the_frame_request() {
        let mut control = RunControl::default();
        let (first, _, _) = control.restart();
        let (second, _, _) = control.restart();
        control.set_pending_frame(first, Some(3));
        control.set_pending_frame(second, Some(4));
        let (_, stale_frame, _) = control.restart();
        assert_eq!(stale_frame, Some(4));
    }

    #[test]
    fn finished_run_leaves_nothing_to_cancel() {
        let mut control = RunControl::default();
        let (run, _, _) = control.restart();
        control.set_pending_frame(run, Some(9));
        assert!(control.finish(run));
        let (_, stale_frame, _) = control.restart();
        assert_eq!(stale_frame, None);
    }

    #[test]
    fn restart_begins_from_the_text_on_screen() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut scramble = Scramble::new("Design", "Launch", &mut rng);
        let shown = (0..10).map(|_| scramble.tick(&mut rng)).last().unwrap().to_plain();

        let restarted = Scramble::new(&shown, "Build", &mut rng);
        let from: String = restarted.queue.iter().filter_map(|s| s.from).collect();
        assert_eq!(from, shown);
        assert_eq!(restarted.queue.len(), shown.chars().count().max(5));
    }

    #[test]
    fn phrases_split_on_bars() {
        assert_eq!(parse_phrases("Design | Build|| Launch "), vec!["Design", "Build", "Launch"]);
        assert!(parse_phrases("").is_empty());
    }
}
