/// Entries of the menu pane, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feature {
    Containers,
    Images,
    Volumes,
}

impl Feature {
    pub const ALL: [Feature; 3] = [Feature::Containers, Feature::Images, Feature::Volumes];

    pub fn label(&self) -> &'static str {
        match self {
            Feature::Containers => "Containers",
            Feature::Images => "Images",
            Feature::Volumes => "Volumes",
        }
    }

    /// Matches a menu line against the known labels, ignoring surrounding
    /// whitespace. Matching is case-sensitive.
    pub fn from_label(label: &str) -> Option<Feature> {
        let label = label.trim();
        Feature::ALL.into_iter().find(|f| f.label() == label)
    }

    /// The line written into the menu pane for this entry.
    pub fn menu_line(&self) -> String {
        format!(" {} \n", self.label())
    }

    /// Pane title shown while this feature's listing is displayed.
    pub fn title(&self) -> String {
        format!(" {} ", self.label())
    }

    /// Singular/plural noun for status messages.
    pub fn noun(&self, count: usize) -> &'static str {
        match (self, count) {
            (Feature::Containers, 1) => "container",
            (Feature::Containers, _) => "containers",
            (Feature::Images, 1) => "image",
            (Feature::Images, _) => "images",
            (Feature::Volumes, 1) => "volume",
            (Feature::Volumes, _) => "volumes",
        }
    }
}
