use orange_sorter_common::SortSummary;
use std::path::PathBuf;

/// What the user has picked for the next analysis run. Picking a folder
/// replaces a picked file and vice versa; both can never be set at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Folder(PathBuf),
    File(PathBuf),
}

#[derive(Default)]
pub struct AppState {
    pub selection: Selection,
    pub result_text: String,
    pub status: String,
    pub summary: Option<SortSummary>,
}

impl AppState {
    pub fn select_folder(&mut self, path: PathBuf) {
        self.selection = Selection::Folder(path);
    }

    pub fn select_file(&mut self, path: PathBuf) {
        self.selection = Selection::File(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_defaults_to_none() {
        let state = AppState::default();
        assert_eq!(state.selection, Selection::None);
    }

    #[test]
    fn test_selecting_file_replaces_folder() {
        let mut state = AppState::default();
        state.select_folder(PathBuf::from("/photos"));
        assert_eq!(state.selection, Selection::Folder(PathBuf::from("/photos")));

        state.select_file(PathBuf::from("/photos/one.jpg"));
        assert_eq!(state.selection, Selection::File(PathBuf::from("/photos/one.jpg")));
    }

    #[test]
    fn test_selecting_folder_replaces_file() {
        let mut state = AppState::default();
        state.select_file(PathBuf::from("/photos/one.jpg"));
        state.select_folder(PathBuf::from("/photos"));
        assert_eq!(state.selection, Selection::Folder(PathBuf::from("/photos")));
    }
}
