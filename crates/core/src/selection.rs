//! Keyboard and pointer driven cursor over the visible results.

/// Cursor over a result list of `len` rows; `None` means no row is selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
	cursor: Option<usize>,
	len: usize,
}

impl Selection {
	/// Fresh selection over `len` rows with nothing selected.
	#[must_use]
	pub fn new(len: usize) -> Self {
		Self { cursor: None, len }
	}

	/// Forget the cursor and adopt a new row count.
	pub fn reset(&mut self, len: usize) {
		*self = Self::new(len);
	}

	#[must_use]
	pub fn selected(&self) -> Option<usize> {
		self.cursor
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.len
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Cursor as an integer in `-1..len`, `-1` meaning no selection.
	#[must_use]
	pub fn cursor(&self) -> isize {
		self.cursor
			.and_then(|row| isize::try_from(row).ok())
			.unwrap_or(-1)
	}

	/// Move down one row, stopping on the last one.
	pub fn down(&mut self) {
		if self.len == 0 {
			return;
		}
		self.cursor = Some(match self.cursor {
			None => 0,
			Some(row) => (row + 1).min(self.len - 1),
		});
	}

	/// Move up one row; moving up from the first row clears the selection.
	pub fn up(&mut self) {
		self.cursor = match self.cursor {
			None | Some(0) => None,
			Some(row) => Some(row - 1),
		};
	}

	/// Select the hovered row. Rows outside the list are ignored.
	pub fn hover(&mut self, row: usize) {
		if row < self.len {
			self.cursor = Some(row);
		}
	}
}
