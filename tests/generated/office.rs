// @generated by smartvo instrument; fingerprint=b175ca26
// Regenerate instead of editing.

smartvo::tracked! {
    #[derive(Debug)]
    pub struct Office {
        values {
            city: String => set_city,
            opened: Option<smartvo::chrono::NaiveDate> => set_opened,
        }
    }
}
