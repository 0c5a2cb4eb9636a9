//! Application runtime and event loop.

use std::collections::VecDeque;
use std::io::stdout;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use ratatui::crossterm::event::{
	self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::SetTitle;
use tracing::{debug, info};

use crate::App;
use crate::host::{BrowseOptions, SiteSource};

/// Browse `source` until the user quits.
pub fn run(source: Arc<dyn SiteSource>, options: BrowseOptions) -> Result<()> {
	let mut app = App::new(source, options)?;
	app.run()
}

impl<'a> App<'a> {
	/// Pump the terminal event loop until the user quits.
	pub fn run(&mut self) -> Result<()> {
		let mut terminal = ratatui::init();
		terminal.clear()?;
		execute!(stdout(), EnableMouseCapture)?;

		self.start();

		let (event_tx, event_rx) = mpsc::channel();
		let event_loop_running = Arc::new(AtomicBool::new(true));
		let event_loop_flag = Arc::clone(&event_loop_running);

		let event_thread = thread::spawn(move || -> Result<()> {
			while event_loop_flag.load(Ordering::Relaxed) {
				if event::poll(Duration::from_millis(50))? {
					let event = event::read()?;
					if event_tx.send(event).is_err() {
						break;
					}
				}
			}
			Ok(())
		});

		let mut pending_events = VecDeque::new();
		let mut shown_title: Option<String> = None;

		let result: Result<()> = 'event_loop: loop {
			loop {
				match event_rx.try_recv() {
					Ok(event) => pending_events.push_back(event),
					Err(mpsc::TryRecvError::Empty) => break,
					Err(mpsc::TryRecvError::Disconnected) => {
						break 'event_loop Err(anyhow!("input event channel disconnected"));
					}
				}
			}

			let now = Instant::now();
			while let Some(event) = pending_events.pop_front() {
				match event {
					Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key, now),
					Event::Mouse(mouse) => self.handle_mouse(mouse, now),
					_ => {}
				}
			}
			if self.should_quit {
				break Ok(());
			}

			self.pump_loads();
			self.tick(Instant::now());
			self.throbber_state.calc_next();

			if let Some(title) = self.document_title()
				&& shown_title.as_deref() != Some(title)
			{
				debug!(title, "window title changed");
				execute!(stdout(), SetTitle(title))?;
				shown_title = Some(title.to_string());
			}

			terminal.draw(|frame| self.draw(frame))?;

			thread::sleep(Duration::from_millis(16));
		};

		self.controller.dispose();
		ratatui::restore();
		execute!(stdout(), DisableMouseCapture)?;

		event_loop_running.store(false, Ordering::Relaxed);
		match event_thread.join() {
			Ok(join_result) => join_result?,
			Err(err) => std::panic::resume_unwind(err),
		}

		info!(pages = self.content.history().len(), "browser closed");
		result
	}
}
