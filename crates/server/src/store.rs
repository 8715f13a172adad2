use shared::domain::Item;
use tokio::sync::RwLock;

/// In-memory item collection. Constructed per server instance and injected
/// through router state; nothing here is process-global, so test fixtures
/// never share items.
pub struct ItemStore {
    items: RwLock<Vec<Item>>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    /// Store preloaded with the three stock articles.
    pub fn seeded() -> Self {
        Self {
            items: RwLock::new(seed_items()),
        }
    }

    pub async fn list(&self) -> Vec<Item> {
        self.items.read().await.clone()
    }

    /// New items go to the front; the list keeps insertion order.
    pub async fn insert_front(&self, item: Item) {
        self.items.write().await.insert(0, item);
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

pub fn seed_items() -> Vec<Item> {
    vec![
        Item::new(
            "This is a Cat",
            vec![
                "Cats are wonderfully lazy mammals that we can all admire and aspire to be. \
                 They are simultaneously aloof and loving, starving hungry and picky, lazy and \
                 hyperactive. Unlike children or dogs, you can drop cats and they won't be injured."
                    .to_string(),
                "Cats often like to be with their humans, particularly when it is most \
                 inconvenient, such as during work calls or in the middle of the night. If they \
                 are unable to reach their humans they will miau loudly and continually until \
                 they gain access."
                    .to_string(),
                "Cats are the perfect companion for anyone looking for fluffy love.... but not \
                 all the time."
                    .to_string(),
            ],
            "/assets/images/pickle-floof.jpg",
            "Pickle is a floof",
        ),
        Item::new(
            "Whisky, Whiskey, Uisge Beatha",
            vec![
                "As I sat in my favourite old chair, listening to the rain lashing the window, \
                 the warmth of the fire soothing my tired, old man's bones, I reflected on the \
                 many wonders that life had thrown my way."
                    .to_string(),
                "What treasures I have held in these hands! I tell my secrets to the amber, \
                 smoky liquid I now cradle, a spirit trapped in a dark casket for years while I \
                 roamed the lands, untethered from my destiny."
                    .to_string(),
            ],
            "https://oldtennesseedistillingco.com/wp-content/uploads/2018/12/Whiskey-or-Whisky.jpeg",
            "A wee dram",
        ),
        Item::new(
            "Snow-Capped Mountains",
            vec![
                "To stand on the very top of a snowy mountain with nothing but space in every \
                 direction is to feel, to know, the insignificance of a human lifespan."
                    .to_string(),
                "At dawn, the first light bathes the peaks in a soft, rose gold glow, while dusk \
                 sees them tinted in hues of violet and indigo, the first stars of night lending \
                 the display their own ethereal sparkle."
                    .to_string(),
                "I left my heart on Buachaille Etive Mòr.".to_string(),
            ],
            "https://www.findingtheuniverse.com/wp-content/uploads/2021/04/Glencoe-Scotland-in-Winter_by_Laurence-Norah.jpg",
            "Glencoe from Rannoch Moor",
        ),
    ]
}
