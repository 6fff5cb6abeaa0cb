//! Built-in English text for trying the pipeline without a graph store.

/// A short race report with enough nouns and verbs to fill both rankings.
pub const SAMPLE_TEXT: &str = "\
The morning fog lifted slowly over the valley as the riders gathered at the start line in Roubaix.
Thousands of spectators lined the cobbled roads, waving flags and shouting encouragement while team cars crawled behind the peloton.
It was April and the weather had turned cold overnight, leaving puddles across the narrow farm tracks that the race would follow for most of the afternoon.
Marianne Vos attacked early, jumping clear of the group on the first sector of cobbles and building a lead that the chasers never recovered.
Her team mates controlled the pace behind her, blocking every move and letting the favourites tire themselves out in the wind.
By the halfway point the gap had grown to two minutes, and the commentators were already calling it one of the great solo rides of the decade.
Mechanics ran alongside the road with spare wheels as punctures claimed rider after rider on the rough stones.
She crashed once on a muddy corner, climbed back on her bike and kept pedalling without looking back.
The crowd roared as she entered the velodrome alone, raised both arms and crossed the line, her jersey covered in mud and her legs shaking.
Later she said the race had tested her more than any climb she had ridden, and that the cobbles had nearly broken her bike and her spirit.
";
