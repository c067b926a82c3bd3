//! # 测试数据
//!
//! 单元测试共用的 CP2K 格式样例文件内容。

/// 单个 H 基组（带两个名称）
pub const BASIS_DZVP_H: &str = "\
 H  DZVP-MOLOPT-GTH DZVP-MOLOPT-GTH-q1
 1
 2 0 1 7 2 1
     11.478000339908  0.024916243200 -0.012512421400  0.024510918200
      3.700758562763  0.079825490000 -0.056449071100  0.058140794100
      1.446884268432  0.128862675300  0.011242684700  0.444709498500
      0.716814589696  0.379448894600 -0.418587548300  0.646207973100
      0.247918564176  0.324552432600  0.590363216700  0.803385018200
      0.066918004004  0.037148121400  0.438703133000  0.892971208700
      0.021708243634 -0.001125195500 -0.059693171300  0.120101316500
";

/// 单个 H 基组（SZV）
pub const BASIS_MOLOPT_H: &str = "\
# BASIS_MOLOPT
H SZV-MOLOPT-GTH SZV-MOLOPT-GTH-q1
 1
 2 0 0 7 1
     11.478000339908  0.024916243200
      3.700758562763  0.079825490000
      1.446884268432  0.128862675300
      0.716814589696  0.379448894600
      0.247918564176  0.324552432600
      0.066918004004  0.037148121400
      0.021708243634 -0.001125195500
";

/// 两个 He 基组中间夹一个 H 基组
pub const BASIS_HE_PAIR: &str = "\
# He and H basis sets
He SZV-MOLOPT-SR-GTH SZV-MOLOPT-SR-GTH-q2
 1
 2 0 0 4 1
      2.995301055000 -0.236838391000
      0.914600000000  0.372001050000
      0.327300000000  0.637584513000
      0.119300000000  0.153214460000
H SZV-MOLOPT-GTH SZV-MOLOPT-GTH-q1
 1
 2 0 0 2 1
      1.446884268432  0.128862675300
      0.247918564176  0.324552432600
He DZVP-MOLOPT-SR-GTH DZVP-MOLOPT-SR-GTH-q2
 1
 2 0 1 4 2 1
      2.995301055000 -0.236838391000  0.066233920000  0.109413610000
      0.914600000000  0.372001050000 -0.271254281000  0.353124153000
      0.327300000000  0.637584513000  0.633016740000  0.647221510000
      0.119300000000  0.153214460000  0.548211223000  0.223310810000
";

/// GTH 赝势样例（含 NLCC 与多投影子）
pub const GTH_POTENTIALS: &str = "\
################################################################################
#
He GTH-PADE-q2 GTH-PADE
    2
     0.20000000    2    -9.12214383     1.70270770
    0
#
He GTH-PBE-q2 GTH-PBE
    2
     0.20000000    2    -9.12214383     1.70270770
    0
#
Li GTH-PBE-q3 GTH-PBE
    3
     0.40000000    4   -14.08115455     9.62621962    -1.78361605     0.08515207
    2
     0.16672405    2     0.18915810     4.32456052
                                       -5.55556070
     0.23499230    1     0.00119000
#
H GTH-PBE-q1 GTH-PBE
    1
     0.20000000    2    -4.17890044     0.72446331
    0
#
C GTH-NLCC-PBE-q4
    2    2
     0.33806795    2    -9.13626850     1.42282242
NLCC   1
     0.27420000    1     1.16952366
    2
     0.30232223    1     9.66551322
     0.28637912    0
";
