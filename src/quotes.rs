use chrono::{Datelike, NaiveDate};
use rand::Rng;

pub struct Verse {
    pub sanskrit: &'static str,
    pub english: &'static str,
    pub hindi: &'static str,
}

const VERSES: &[Verse] = &[
    Verse {
        sanskrit: "कर्मण्येवाधिकारस्ते मा फलेषु कदाचन। मा कर्मफलहेतुर्भूर्मा ते सङ्गोऽस्त्वकर्मणि॥",
        english: "You have a right to perform your prescribed duties, but you are not entitled to the fruits of your actions.",
        hindi: "तुम्हें अपने निर्धारित कर्तव्यों का पालन करने का अधिकार है, लेकिन तुम अपने कर्मों के फल के हकदार नहीं हो।",
    },
    Verse {
        sanskrit: "योगस्थः कुरु कर्माणि सङ्गं त्यक्त्वा धनञ्जय। सिद्ध्यसिद्ध्योः समो भूत्वा समत्वं योग उच्यते॥",
        english: "Perform your duty equipoised, O Arjuna, abandoning all attachment to success or failure. Such equanimity is called yoga.",
        hindi: "हे अर्जुन, सफलता या असफलता से सभी मोह को त्यागकर, समभाव से अपना कर्तव्य निभाओ। ऐसी समता को योग कहते हैं।",
    },
    Verse {
        sanskrit: "क्रोधाद्भवति संमोहः संमोहात्स्मृतिविभ्रमः। स्मृतिभ्रंशाद्बुद्धिनाशो बुद्धिनाशात्प्रणश्यति॥",
        english: "From anger, great delusion arises, and from delusion, bewilderment of memory. When memory is bewildered, intelligence is lost, and when intelligence is lost, one falls down again into the material pool.",
        hindi: "क्रोध से बड़ा भ्रम उत्पन्न होता है, और भ्रम से स्मृति का भ्रम होता है। जब स्मृति भ्रमित होती है, तो बुद्धि नष्ट हो जाती है, और जब बुद्धि नष्ट हो जाती है, तो व्यक्ति फिर से भौतिक कुंड में गिर जाता है।",
    },
    Verse {
        sanskrit: "यदा यदा हि धर्मस्य ग्लानिर्भवति भारत। अभ्युत्थानमधर्मस्य तदात्मानं सृजाम्यहम्॥",
        english: "Whenever and wherever there is a decline in religious practice, O descendant of Bharata, and a predominant rise of irreligion, at that time I descend Myself.",
        hindi: "जब भी और जहाँ भी धर्म की हानि होती है, हे भरत के वंशज, और अधर्म की प्रबल वृद्धि होती है - उस समय मैं स्वयं अवतरित होता हूँ।",
    },
    Verse {
        sanskrit: "परित्राणाय साधूनां विनाशाय च दुष्कृताम्। धर्मसंस्थापनार्थाय सम्भवामि युगे युगे॥",
        english: "To deliver the pious and to annihilate the miscreants, as well as to reestablish the principles of religion, I Myself appear, millennium after millennium.",
        hindi: "साधुओं का उद्धार करने और दुष्टों का नाश करने के साथ-साथ धर्म के सिद्धांतों को फिर से स्थापित करने के लिए, मैं स्वयं सहस्राब्दी के बाद सहस्राब्दी में प्रकट होता हूँ।",
    },
];

const MOTIVATIONAL: &[&str] = &[
    "The secret of getting ahead is getting started.",
    "Don't watch the clock; do what it does. Keep going.",
    "The will to win, the desire to succeed, the urge to reach your full potential... these are the keys that will unlock the door to personal excellence.",
    "Success is not final, failure is not fatal: it is the courage to continue that counts.",
    "Believe you can and you're halfway there.",
];

/// Same verse all day, rotating through the cycle by day of year.
pub fn verse_of_day(date: NaiveDate) -> &'static Verse {
    let index = date.ordinal() as usize % VERSES.len();
    &VERSES[index]
}

pub fn random_motivation<R: Rng>(rng: &mut R) -> &'static str {
    MOTIVATIONAL[rng.gen_range(0..MOTIVATIONAL.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_verse_stable_within_day() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let a = verse_of_day(date);
        let b = verse_of_day(date);
        assert_eq!(a.sanskrit, b.sanskrit);
    }

    #[test]
    fn test_verse_rotates_daily() {
        let day1 = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let day2 = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        assert_ne!(verse_of_day(day1).sanskrit, verse_of_day(day2).sanskrit);
    }

    #[test]
    fn test_every_verse_has_both_translations() {
        for verse in VERSES {
            assert!(!verse.english.is_empty());
            assert!(!verse.hindi.is_empty());
        }
    }

    #[test]
    fn test_motivation_from_pool() {
        let mut rng = SmallRng::seed_from_u64(7);
        let quote = random_motivation(&mut rng);
        assert!(MOTIVATIONAL.contains(&quote));
    }
}
