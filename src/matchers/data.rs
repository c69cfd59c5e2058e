//! Embedded ranked wordlists and substitution tables.
//!
//! Lists are whitespace-separated, in rank order (most common first), and
//! parsed once into lookup maps. They are deliberately curated: keyboard
//! rows, digit-only strings, and sequence-shaped tokens are left out because
//! the spatial, sequence, and date matchers model those shapes with better
//! entropy estimates than a rank lookup would.

use crate::config::Dictionary;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Most common leaked passwords, rank order.
const PASSWORDS: &str = "\
password iloveyou princess rockyou babygirl monkey lovely jessica michael \
ashley nicole daniel justin jordan superman harley hunter shadow letmein \
trustno1 sunshine master welcome freedom whatever ninja mustang dragon \
jennifer amanda joshua cheese purple pepper ginger matthew robert soccer \
batman andrew tigger charlie thomas hockey ranger killer george computer \
michelle maggie summer buster sparky cookie hello banana chelsea angela \
melissa barney anthony brandy secret merlin diamond morgan eagles junior \
silver cooper orange taylor yankees hannah tennis austin whitney william \
liverpool phoenix panther arsenal madison pokemon slipknot chicken heather \
midnight flower scooter gemini bailey coffee guitar falcon marina samsung \
samantha creative peanut pearljam mercedes jasmine boomer steelers spider \
rainbow marine victoria snoopy nathan maverick penguin marley flipper \
barcelona sandra angels tweety mickey player smokey sierra prince corvette \
brooklyn horses chester winter winner";

/// Common English words, rank order.
const ENGLISH: &str = "\
the and for are but not you all any can her was one our out day get has him \
his how man new now old see two way who boy did its let put say she too use \
that with have this will your from they know want been good much some time \
very when come here just like long make many more only over such take than \
them well were what work year about after again could every first found \
great house large learn never other place right small sound spell still \
study their there these thing think three water where which world would \
write people before should because through between another against nothing \
something everything love life home family friend heart money music power \
night light white black green happy sweet angel magic dream ocean \
river mountain forest flower garden summer winter spring autumn sunday \
monday tuesday friday saturday little people under story children country \
always almost along already although number office paper party question \
school second simple social special strong system today together toward \
understand until window woman wonder young beautiful brother sister \
mother father daughter pass word sword star fire wind earth stone gold \
king queen knight wizard tiger lion bear wolf hawk snake horse eagle fish \
bird tree rock road rain snow storm cloud moon space dark blue red pink \
baby girl cool nice best fast slow high low big top fun run sun dog \
cat car sea sky air ice age ace art ask bad bag ball band bank base bath \
beach bell belt bike bill blood board boat body bone book boot boss bowl \
box brain bread break bridge burn bus cake camp card care case cash chair \
chance change chase chest chief child city class clock club coach coast \
coat code cold color couch count court cover crew crime cross crowd crown \
cup cut dance date dead deal dear deep desk dice dirt dish door doubt down \
draw drive drop dry duck dust duty each ear east easy edge face fact fall \
farm fear feed feel field fight file fill film find fine five flag \
flat floor food foot form four free fresh front fruit full game gate gift \
give glass goal grade grass ground group grow guard guess hair half hand \
hang hard head hear heat help hide hill hold hole hope horn hour huge hurt \
idea inch iron item join joke jump keep key kick kind kiss knee knife lady \
lake land last late laugh lead leaf left leg lift line lip list live load \
lock look lose loud luck lunch mail main map mark mass match meal mean \
meat meet mile milk mind mine miss mix model month mood morning most mouth \
move name near neck need nest net news next nine noise north nose note \
nurse odd off oil once open order owner page pain paint pair park part \
past path peace pick piece pilot pipe plan plane plant plate play point \
pool pop port post pound press price pride print prize proof pull pure \
push race radio rail raise range rate reach read real rest rice rich ride \
ring rise risk roll roof room root rope rose rough round rule safe sail \
salt same sand save scale scene score seat self sell send sense set seven \
shake shape share sharp sheet shelf shine ship shirt shoe shop short shot \
show shut sick side sign silk sing site six size skill skin sleep slide \
smart smell smile smoke soap soft soil song sort soul south speak speed \
spin sport spot staff stage stamp stand start state stay steam steel step \
stick store street stretch strike string suit table tail talk tall team \
tear tell ten test text thank theory thick thin third tide tie till tip \
tire title toe tone tongue tool tooth total touch tough town track trade \
train trip truck true trust truth turn twist type unit upon user valley \
value view voice vote wait walk wall war warm wash watch wave weak wear \
week west wet wheel while wide wife wild win wine wing wise wish wood \
wool worth yard yell yellow yes yet zero zone";

/// Common given names and surnames, rank order.
const NAMES: &str = "\
james john robert michael david william richard joseph thomas charles \
christopher daniel matthew anthony mark donald steven paul andrew joshua \
kenneth kevin brian george timothy ronald edward jason jeffrey ryan jacob \
gary nicholas eric jonathan stephen larry justin scott brandon benjamin \
samuel gregory frank alexander raymond patrick jack dennis jerry tyler \
aaron mary patricia jennifer linda elizabeth barbara susan jessica sarah \
karen lisa nancy betty margaret sandra ashley kimberly emily donna \
michelle carol amanda dorothy melissa deborah stephanie rebecca sharon \
laura cynthia kathleen amy angela shirley anna brenda pamela emma nicole \
helen samantha katherine christine debra rachel carolyn janet catherine \
maria heather diane ruth julie olivia joyce virginia smith johnson \
williams brown jones garcia miller davis rodriguez martinez hernandez \
lopez gonzalez wilson anderson taylor moore jackson martin lee perez \
thompson white harris sanchez clark ramirez lewis robinson walker young \
allen wright torres nguyen hill flores green adams nelson baker \
hall rivera campbell mitchell carter roberts gomez phillips evans turner \
diaz parker cruz edwards collins reyes stewart morris morales murphy cook \
rogers gutierrez ortiz morgan cooper peterson bailey reed kelly howard \
ramos kim cox ward richardson watson brooks chavez wood bennett gray";

fn parse_ranked(raw: &str) -> HashMap<String, usize> {
    raw.split_whitespace()
        .enumerate()
        .map(|(i, w)| (w.to_string(), i + 1))
        .collect()
}

static PASSWORD_MAP: Lazy<HashMap<String, usize>> = Lazy::new(|| parse_ranked(PASSWORDS));
static ENGLISH_MAP: Lazy<HashMap<String, usize>> = Lazy::new(|| parse_ranked(ENGLISH));
static NAME_MAP: Lazy<HashMap<String, usize>> = Lazy::new(|| parse_ranked(NAMES));

/// Leet-speak substitution table: substituted char to the letters it can
/// stand for.
pub static LEET_TABLE: Lazy<HashMap<char, Vec<char>>> = Lazy::new(|| {
    let mut table = HashMap::new();
    let entries: &[(char, &[char])] = &[
        ('4', &['a']),
        ('@', &['a']),
        ('8', &['b']),
        ('(', &['c']),
        ('<', &['c']),
        ('3', &['e']),
        ('6', &['g']),
        ('9', &['g']),
        ('1', &['i', 'l']),
        ('!', &['i', 'l']),
        ('|', &['i', 'l']),
        ('0', &['o']),
        ('5', &['s']),
        ('$', &['s']),
        ('7', &['t']),
        ('+', &['t']),
        ('%', &['x']),
        ('2', &['z']),
    ];
    for (from, to) in entries {
        table.insert(*from, to.to_vec());
    }
    table
});

/// The default ranked dictionaries: leaked passwords, English words, names.
#[must_use]
pub fn default_dictionaries() -> Vec<Dictionary> {
    vec![
        Dictionary::new("passwords", &PASSWORD_MAP),
        Dictionary::new("english", &ENGLISH_MAP),
        Dictionary::new("names", &NAME_MAP),
    ]
}

/// Size of the smallest character class a char could have been drawn from.
///
/// Used for brute-force and repeat entropy: a digit costs `log2(10)` bits,
/// a letter `log2(26)`, an ASCII symbol `log2(33)`, anything beyond ASCII a
/// flat 100-symbol alphabet.
#[must_use]
pub fn charset_cardinality(ch: char) -> u32 {
    if ch.is_ascii_digit() {
        10
    } else if ch.is_ascii_lowercase() || ch.is_ascii_uppercase() {
        26
    } else if ch.is_ascii() {
        33
    } else {
        100
    }
}
