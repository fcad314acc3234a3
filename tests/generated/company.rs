// @generated by smartvo instrument; fingerprint=12c34ba3
// Regenerate instead of editing.

use super::office::Office;

smartvo::tracked! {
    /// Top-level customer
    #[derive(Debug)]
    pub struct Company {
        values {
            name: Option<String> => set_name,
            capital: i128 => set_capital,
            logo: Vec<u8> => set_logo,
        }
        references {
            parent: Option<smartvo::node::Shared<Company>> => set_parent,
        }
        lists {
            offices: smartvo::node::Shared<Office> => set_offices,
        }
        maps {
            branches: String => smartvo::node::Shared<Office> => set_branches,
        }
    }
}
