/// Screens of the terminal UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    BucketList,
    CreateBucket,
    CreateKey,
    EditValue,
    EditBucketName,
    EditKeyName,
    ConfirmDeleteKey,
    ConfirmDeleteBucket,
    Settings,
}

impl UiState {
    /// States where printable keys go to the text field.
    pub fn is_text_entry(self) -> bool {
        matches!(
            self,
            UiState::CreateBucket
                | UiState::CreateKey
                | UiState::EditValue
                | UiState::EditBucketName
                | UiState::EditKeyName
        )
    }
}
